use std::{error::Error,
          fs::File,
          io::Write};
use xy_sampling::{Coordinates, Sampling, Window};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")).init();
    let path = "/tmp/latex_speed.tex";
    let mut fh = File::create(path)?;
    write!(fh, "\\documentclass[12pt,a4paper]{{article}}\n\
                \\usepackage{{tikz}}\n\
                \\begin{{document}}\n\
                \\begin{{tikzpicture}}\n")?;
    let w = Window::new(-6., 6., -1.2, 1.2)?;
    let n = 4001;
    let s = Sampling::xy(f64::sin, w).width(n).height(n)
        .coordinates(Coordinates::Domain).build()?;
    println!("Run \"latex {}\" to measure LaTeX speed with {} points.\n",
             path, s.iter().flatten().count());
    s.latex().write(&mut fh)?;
    write!(fh, "\\end{{tikzpicture}}\n\
                \\end{{document}}")?;
    Ok(())
}
