use std::{error::Error,
          fs::File,
          io::Write};
use rgb::RGB8;
use xy_sampling::{Coordinates, Sampling, Window};

type R = Result<(), Box<dyn Error>>;

fn main() -> R {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")).init();
    let w = Window::default();
    let mut gp = File::create("/tmp/asymptotes.gp")?;
    write!(gp, "set terminal pngcairo\n\
                set grid\n")?;
    let mut tex = File::create("/tmp/asymptotes.tex")?;
    write!(tex, "\\begin{{tikzpicture}}[x=2mm, y=2mm]\n")?;

    let mut plot = |name: &str, s: Sampling, color: RGB8| -> R {
        let fname = format!("/tmp/asymptotes_{}.dat", name);
        s.write(&mut File::create(&fname)?)?;
        log::info!("{}: {} polylines, {} evaluations",
                   name, s.len(), s.evaluations());
        write!(gp, "set output \"asymptotes_{}.png\"\n\
                    plot [-10:10] [-10:10] '{}' with l lw 2 title \"{}\"\n",
               name, &fname, name)?;
        s.latex().color(color).write(&mut tex)?;
        Ok(())
    };

    let s = Sampling::xy(f64::tan, w)
        .coordinates(Coordinates::Domain).build()?;
    plot("tan", s, RGB8 { r: 200, g: 0, b: 0 })?;
    let s = Sampling::xy(|x: f64| 1. / x, w)
        .coordinates(Coordinates::Domain).build()?;
    plot("inv", s, RGB8 { r: 0, g: 0, b: 200 })?;
    let s = Sampling::xy(|x: f64| if x < 0. { None } else { Some(x.sqrt()) }, w)
        .coordinates(Coordinates::Domain).build()?;
    plot("sqrt", s, RGB8 { r: 0, g: 150, b: 0 })?;
    let s = Sampling::xy(|x: f64| 1. / x, w)
        .coordinates(Coordinates::RoughDomain).build()?;
    plot("inv_rough", s, RGB8 { r: 100, g: 100, b: 100 })?;

    write!(tex, "\\end{{tikzpicture}}\n")?;
    Ok(())
}
