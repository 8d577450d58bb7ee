extern crate spline_interp;

use spline_interp::Spline;

fn main() {

    let x_min = 0.0;
    let x_max = 6.0;

    let x = vec![x_min, 1.0, 2.0, 4.0, 5.0, x_max];
    let y = vec![1.0, -1.0, 0.0, 3.0, 1.0, 0.5];

    let spline = Spline::new(x, y).unwrap();

    let number_of_steps = 60;
    let step = (x_max - x_min) / number_of_steps as f64;

    println!("x;y;dy");
    for i in 0..=number_of_steps {
        let x = x_min + step * i as f64;
        println!("{:.2};{:.2};{:.2}", x, spline.evaluate(x), spline.derivative(x));
    }
}
