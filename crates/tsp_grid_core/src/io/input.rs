use std::{fmt, fs, io::Read};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    error::{Error, Result},
    io::options::SolverOptions,
};

const ERR_NO_POINTS: &str = "No points provided.";

/// Parsed solver input: one coordinate row per record, in input order.
/// Rows keep their raw width so the solver can judge the collection's
/// shape as a whole.
#[derive(Clone, Debug)]
pub struct SolverInput {
    rows: Vec<Vec<f64>>,
}

impl SolverInput {
    /// Resolves the input source from options: generated points, a file,
    /// or stdin, in that priority order.
    pub fn from_options(options: &SolverOptions) -> Result<Self> {
        if options.random_points > 0 {
            log::debug!(
                "input: random n={} seed={} coord_max={}",
                options.random_points,
                options.seed,
                options.coord_max
            );
            return Ok(Self {
                rows: random_rows(options.random_points, options.seed, options.coord_max),
            });
        }

        let text = if options.input.is_empty() {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        } else {
            fs::read_to_string(&options.input)?
        };

        Ok(Self {
            rows: parse_rows(&text)?,
        })
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for SolverInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "points={}", self.rows.len())
    }
}

/// Whitespace-separated tokens of comma-joined reals. Row widths are not
/// judged here; the solver checks the collection's shape.
fn parse_rows(input: &str) -> Result<Vec<Vec<f64>>> {
    let mut rows = Vec::new();
    for (idx, token) in input.split_whitespace().enumerate() {
        let mut row = Vec::new();
        for field in token.split(',') {
            let value: f64 = field.parse().map_err(|_| {
                Error::invalid_input(format!(
                    "Token {}: invalid coordinate: {field}",
                    idx + 1
                ))
            })?;
            row.push(value);
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(Error::invalid_input(ERR_NO_POINTS));
    }

    Ok(rows)
}

/// Uniform points over `[0, coord_max)^2`, seeded for reproducible runs.
fn random_rows(n: usize, seed: u64, coord_max: f64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            vec![
                rng.gen_range(0.0..coord_max),
                rng.gen_range(0.0..coord_max),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_rows, random_rows};

    #[test]
    fn parse_rows_reads_whitespace_separated_tokens() {
        let rows = parse_rows("1.0,2.0\n3.0,4.0 5.0,6.0").expect("parse rows");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![1.0, 2.0]);
        assert_eq!(rows[2], vec![5.0, 6.0]);
    }

    #[test]
    fn parse_rows_keeps_row_width_for_shape_checking() {
        let rows = parse_rows("1,2,3 4,5,6").expect("parse rows");
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 3);
    }

    #[test]
    fn parse_rows_rejects_empty_input() {
        let err = parse_rows(" \n\t ").expect_err("empty input");
        assert!(err.to_string().contains("No points provided."));
    }

    #[test]
    fn parse_rows_rejects_non_numeric_coordinates() {
        let err = parse_rows("a,2").expect_err("invalid coordinate");
        assert!(err.to_string().contains("invalid coordinate"));
        assert!(err.to_string().contains("Token 1"));
    }

    #[test]
    fn parse_rows_rejects_empty_fields() {
        let err = parse_rows("1,").expect_err("trailing comma");
        assert!(err.to_string().contains("invalid coordinate"));
    }

    #[test]
    fn random_rows_are_reproducible_and_bounded() {
        let a = random_rows(50, 7, 100.0);
        let b = random_rows(50, 7, 100.0);
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
        for row in &a {
            assert_eq!(row.len(), 2);
            assert!(row.iter().all(|v| (0.0..100.0).contains(v)));
        }

        let c = random_rows(50, 8, 100.0);
        assert_ne!(a, c);
    }
}
