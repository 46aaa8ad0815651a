use ipop_es::IpopBuilder;
use ndarray::array;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Rosenbrock test function: min f(x) = 0 at x = (1, 1)
    let rosenbrock = |x: &[f64]| argmin_testfunctions::rosenbrock(x);

    let res = IpopBuilder::minimize(rosenbrock)
        .configure(|config| config.max_evals(50_000).initial_step_size(0.5).seed(42))
        .run(&array![-1.2, 1.0])?;
    println!(
        "Rosenbrock minimum y = {} at x = {} ({} evals, {} restarts, {:?})",
        res.y_opt, res.x_opt, res.n_evals, res.n_restarts, res.stop_reason
    );
    Ok(())
}
