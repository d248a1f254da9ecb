use egobox_nngp::covariograms::{NeuralNetCovariogram, SquaredExpCovariogram};
use egobox_nngp::GaussianProcess;
use linfa::prelude::*;
use ndarray::{array, Array, Axis};

fn xsinx(x: f64) -> f64 {
    (x - 3.5) * ((x - 3.5) / std::f64::consts::PI).sin()
}

fn main() {
    env_logger::init();

    let xtrain = Array::linspace(0., 25., 26).insert_axis(Axis(1));
    let ytrain = xtrain.column(0).mapv(xsinx);

    let mut gp = GaussianProcess::<f64, SquaredExpCovariogram<f64>>::params(
        SquaredExpCovariogram::isotropic(2.).expect("covariogram"),
    )
    .lambda(1e-8)
    .fit(&Dataset::new(xtrain, ytrain))
    .expect("GP built");
    println!("{gp}");

    for x in [2.5, 7.25, 13.6, 21.] {
        let (mean, variance) = gp.interpolate(&array![x], 5).expect("GP interpolation");
        println!(
            "x = {x:5.2}: {mean:8.4} +/- {:.2e} (exact {:8.4})",
            variance.sqrt(),
            xsinx(x)
        );
    }

    // Leave-one-out error
    let loo: f64 = (0..gp.len())
        .map(|i| {
            let (mean, _) = gp.self_interpolate(i, 5).expect("GP interpolation");
            let (_, y) = gp.sample(i).expect("sample");
            (mean - y[0]).powi(2)
        })
        .sum::<f64>()
        / gp.len() as f64;
    println!("Leave-one-out mean squared error: {loo:.3e}");

    gp.add_point(&array![7.25], xsinx(7.25)).expect("point added");
    let xtest = Array::linspace(0., 25., 11).insert_axis(Axis(1));
    let (means, variances) = gp.batch_interpolate_valvar(&xtest).expect("GP interpolation");
    println!("Batch means:\n{means}\nBatch variances:\n{variances}");

    let mut gp = gp
        .with_covariogram(NeuralNetCovariogram::new(1., 0.5).expect("covariogram"))
        .expect("covariogram changed");
    let (mean, _) = gp.interpolate(&array![13.6], 5).expect("GP interpolation");
    println!("Neural network covariogram at 13.6: {mean:8.4}");
    println!("{}", gp.timer());
}
