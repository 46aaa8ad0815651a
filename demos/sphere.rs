use ipop_es::{IpopBuilder, PopulationLimit};
use ndarray::Array1;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // 10-dimensional sphere: min f(x) = 0 at the origin
    let sphere = |x: &[f64]| x.iter().map(|&xi| xi * xi).sum::<f64>();

    let res = IpopBuilder::minimize(sphere)
        .configure(|config| {
            config
                .max_evals(100_000)
                .population_limit(PopulationLimit::Fixed(256))
                .seed(42)
        })
        .run(&Array1::from_elem(10, 3.0))?;
    println!(
        "Sphere minimum y = {} at x = {} ({} evals, {} restarts, {:?})",
        res.y_opt, res.x_opt, res.n_evals, res.n_restarts, res.stop_reason
    );
    Ok(())
}
