use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use crate::{point::Point, Result};

/// Writes the visited sequence, one `x,y` line per point in visit order,
/// to stdout or to the given path.
pub fn write_tour(path: &str, route: &[Point]) -> Result<()> {
    if path.is_empty() {
        let stdout = io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        write_lines(&mut writer, route)?;
        writer.flush()?;
    } else {
        let mut writer = BufWriter::new(File::create(path)?);
        write_lines(&mut writer, route)?;
        writer.flush()?;
        log::debug!("output: n={} path={path}", route.len());
    }
    Ok(())
}

fn write_lines(writer: &mut impl Write, route: &[Point]) -> io::Result<()> {
    for point in route {
        writeln!(writer, "{point}")?;
    }
    Ok(())
}
