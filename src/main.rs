use std::sync::Arc;

use vecmat_core::{Matrix, Result, Tracker, Vector};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let mut args = std::env::args();

    let tracker = match args.nth(1).as_deref() {
        None => Tracker::global(),
        Some("quiet") => Tracker::silent(),
        Some(_) => {
            println!("unknown mode!");
            return;
        }
    };

    if let Err(err) = run(&tracker) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run(tracker: &Arc<Tracker>) -> Result<()> {
    vectors(tracker)?;
    matrices(tracker)?;

    println!();
    println!("vectors created: {}", tracker.vectors_created());
    println!("matrices created: {}", tracker.matrices_created());

    Ok(())
}

fn vectors(tracker: &Arc<Tracker>) -> Result<()> {
    println!("vectors:");

    let mut v1 = Vector::new_in(3, tracker);
    let mut v2 = Vector::new_in(3, tracker);
    for i in 0..3 {
        *v1.get_mut(i)? = (i + 1) as f64;
        *v2.get_mut(i)? = (i + 4) as f64;
    }

    let v3 = v1.checked_add(&v2)?;
    print_vector(&v3);

    let v4 = v1.checked_sub(&v2)?;
    print_vector(&v4);

    println!("dot product: {}", v1.checked_dot(&v2)?);

    let v5 = -&v1;
    print_vector(&v5);

    let v6 = 2.5 * &v1;
    print_vector(&v6);

    Ok(())
}

fn matrices(tracker: &Arc<Tracker>) -> Result<()> {
    println!("matrices:");

    let m1 = Matrix::from_rows_in(&[[1.0, 2.0], [3.0, 4.0]], tracker)?;
    let m2 = Matrix::from_rows_in(&[[5.0, 6.0], [7.0, 8.0]], tracker)?;

    for m in [m1.checked_add(&m2)?, m1.checked_sub(&m2)?, m1.checked_mul(&m2)?, -&m1, 3.0 * &m1] {
        println!("matrix {}:\n{m}", m.id());
    }

    let v7 = Vector::from_vec_in(vec![1.0, 2.0], tracker);
    let v8 = m1.checked_mul_vector(&v7)?;
    print_vector(&v8);

    Ok(())
}

fn print_vector(v: &Vector) {
    println!("vector {}: {v}", v.id());
}
