use std::{error::Error,
          fs::File,
          io::Write};
use xy_sampling::{Sampling, Window};

type R = Result<(), Box<dyn Error>>;

fn main() -> R {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")).init();
    let mut fh = File::create("/tmp/sin_inv_x.gp")?;
    write!(fh, "set terminal pngcairo\n\
                set grid\n")?;
    let mut d = 0;
    let mut save = |s: &Sampling, title: &str| -> R {
        d += 1;
        let fname = format!("/tmp/sin_inv_x{}.dat", d);
        s.write(&mut File::create(&fname)?)?;
        let n = s.evaluations();
        write!(fh, "set output \"sin_inv_x{}.png\"\n\
                    set yrange [*:*] reverse\n\
                    plot '{}' with l lt 1 lw 2 title \"{} ({} evals)\"\n",
               d, &fname, title, n)?;
        Ok(())
    };

    let f = |x: f64| x * (1. / x).sin();
    let w = Window::new(-0.4, 0.4, -0.4, 0.4)?;
    let s = Sampling::xy(f, w).width(227).height(227).build()?;
    save(&s, "x sin(1/x)")?;
    let s = Sampling::xy(f, w).width(389).height(389).build()?;
    save(&s, "x sin(1/x)")?;

    let w = Window::new(-0.4, 0.4, -1.1, 1.1)?;
    let s = Sampling::xy(|x: f64| (1. / x).sin(), w)
        .width(391).height(391).build()?;
    save(&s, "sin(1/x)")?;
    log::info!("gnuplot /tmp/sin_inv_x.gp to render the graphs");
    Ok(())
}
