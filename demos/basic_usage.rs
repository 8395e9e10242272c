use anyhow::{Context, Result};
use labeled_vector::{SharedVector, Vector};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    println!("Labeled Vector Demo");
    println!("===================\n");

    let mut query = Vector::new("query", vec![3.0, 4.0]).context("Failed to build query vector")?;
    let candidates = [
        Vector::new("same", vec![6.0, 8.0])?,
        Vector::new("close", vec![4.0, 3.0])?,
        Vector::new("orthogonal", vec![-4.0, 3.0])?,
        Vector::new("opposite", vec![-3.0, -4.0])?,
    ];

    println!("{query}");
    for candidate in &candidates {
        let similarity = query
            .cosine_similarity(candidate)
            .with_context(|| format!("Failed to compare with {}", candidate.label()))?;
        info!(candidate = candidate.label(), similarity, "compared");
        println!(
            "  {:<12} dot={:>6.2} cos={:>6.3}",
            candidate.label(),
            query.dot_product(candidate)?,
            similarity
        );
    }

    // Untyped input is validated element by element.
    let untyped = json!({ "label": "loaded", "coefficients": [0, "1", 2] });
    match Vector::from_json(&untyped["label"], &untyped["coefficients"]) {
        Ok(vector) => println!("\nLoaded {vector}"),
        Err(err) => warn!(error = %err, "rejected untyped vector"),
    }

    // Emptying through the setter is allowed; the norm follows.
    query.set_coefficients(Vec::<f64>::new());
    println!("\nAfter clearing: {query}");

    let shared = SharedVector::new(Vector::new("shared", vec![1.0, 2.0, 2.0])?);
    let worker = {
        let shared = shared.clone();
        std::thread::spawn(move || shared.set_coefficients(vec![2.0, 4.0, 4.0]))
    };
    worker.join().map_err(|_| anyhow::anyhow!("worker thread panicked"))?;
    println!("Shared vector now: {}", shared.snapshot());

    Ok(())
}
