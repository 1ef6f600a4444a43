//! Per-AMG report rows, written as JSON lines.

use std::io::Write;

use serde::Serialize;

use super::summary::cycle_structure_label;
use crate::graph::Diameter;
use crate::types::{AberrationMultigraph, AmgError, Edge, Vertex};

/// Everything the census records about one AMG.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow<V> {
    /// AMG name.
    pub name: String,
    /// Identity fingerprint (DSB + rejoin edges).
    pub fingerprint: String,
    /// Diameter of the full multigraph.
    pub diameter: Diameter,
    /// Cycle-structure label, e.g. `"4*2+6"`.
    pub cycle_structure: String,
    /// Cycle basis of the DSB + rejoin subgraph.
    pub cycles: Vec<Vec<V>>,
    /// Chromatin + DSB edges.
    pub init_config: Vec<Edge<V>>,
    /// Chromatin + rejoin edges.
    pub final_config: Vec<Edge<V>>,
}

impl<V: Vertex + Serialize> ReportRow<V> {
    /// Compute the row for `amg`.
    pub fn from_amg(amg: &AberrationMultigraph<V>) -> Result<Self, AmgError> {
        Ok(Self {
            name: amg.name().to_string(),
            fingerprint: amg.fingerprint()?,
            diameter: amg.diameter(),
            cycle_structure: cycle_structure_label(&amg.cycle_structure()),
            cycles: amg.cycles(),
            init_config: amg.init_config(),
            final_config: amg.final_config(),
        })
    }
}

/// Write one JSON line per AMG to `out`, returning the number of rows.
pub fn write_report<V, W>(out: &mut W, amgs: impl IntoIterator<Item = AberrationMultigraph<V>>) -> Result<u64, AmgError>
where
    V: Vertex + Serialize,
    W: Write,
{
    let mut rows = 0;
    for amg in amgs {
        let row = ReportRow::from_amg(&amg)?;
        let mut line = serde_json::to_vec(&row)?;
        line.push(b'\n');
        out.write_all(&line)?;
        rows += 1;
    }
    out.flush()?;
    tracing::debug!(rows, "report written");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AberrationMultigraph<u32> {
        AberrationMultigraph::new(
            vec![(1, 2), (3, 4), (5, 6), (7, 8)],
            vec![(2, 3), (4, 5), (6, 7)],
            vec![(2, 5), (3, 7), (4, 6)],
        )
        .with_name("sample")
    }

    #[test]
    fn test_row_fields() {
        let row = ReportRow::from_amg(&sample()).unwrap();

        assert_eq!(row.name, "sample");
        assert_eq!(row.fingerprint.len(), 16);
        assert_eq!(row.cycle_structure, "6");
        assert_eq!(row.init_config.len(), 7);
        assert!(row.final_config.contains(&Edge::new(3, 7)));
    }

    #[test]
    fn test_json_lines() {
        let mut buf = Vec::new();
        let rows = write_report(&mut buf, vec![sample(), sample().with_name("again")]).unwrap();
        assert_eq!(rows, 2);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["name"], "sample");
        assert_eq!(first["cycle_structure"], "6");
        assert_eq!(first["init_config"][0], serde_json::json!([1, 2]));
    }

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let err = write_report(&mut Closed, vec![sample()]).unwrap_err();
        assert!(matches!(err, AmgError::Io(_)), "{:?}", err);
        assert!(err.to_string().starts_with("I/O error"));
    }
}
