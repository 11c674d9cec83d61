use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use rgb::RGB8;
use distinct_colors::{GeneratorConfig, PaletteGenerator, Sampling};

type Err = Box<dyn Error>;

fn css_string(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

fn table_of_colors(fh: &mut impl Write, colors: &[RGB8], background: RGB8,
                   comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px; border-spacing: 4px; \
                  background-color: {}\"><tr>", css_string(background))?;
    for &c in colors {
        writeln!(fh, "  <td title=\"{}\" style=\"width: 30px; height: 30px; \
                      background-color: {}\"></td>",
                 css_string(c), css_string(c))?;
    }
    writeln!(fh, "<td style=\"padding-left: 7px; color: gray\">\
                  {comment}</td></tr></table><br/>")?;
    Ok(())
}

fn palette(fh: &mut impl Write, sampling: Sampling, background: Option<RGB8>,
           n: usize, comment: &str) -> Result<(), Err> {
    let config = GeneratorConfig::default().sampling(sampling);
    let mut generator = PaletteGenerator::seeded(config, 1);
    if let Some(bg) = background { generator.add(bg, 4.) }
    let colors: Vec<_> = (0 .. n).map(|_| generator.next_color()).collect();
    let comment = format!("{comment} (threshold {:.3})", generator.threshold());
    table_of_colors(fh, &colors, background.unwrap_or(RGB8::new(255, 255, 255)),
                    &comment)
}

fn main() -> Result<(), Err> {
    tracing_subscriber::fmt::init();
    let mut fh = BufWriter::new(File::create("swatches.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>distinct-colors: {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap_or_default())?;
    let white = RGB8::new(255, 255, 255);
    let black = RGB8::new(0, 0, 0);
    for n in [8, 16, 32] {
        writeln!(fh, "<h3>{n} colors</h3>")?;
        palette(&mut fh, Sampling::Uniform, None, n, "uniform")?;
        palette(&mut fh, Sampling::Dim, Some(white), n,
                "dim, away from white")?;
        palette(&mut fh, Sampling::Bright, Some(black), n,
                "bright, away from black")?;
    }
    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
