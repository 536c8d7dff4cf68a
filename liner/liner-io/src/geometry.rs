//! Liner point cloud geometry files.
//!
//! The first line is a header that may declare the default head radius
//! after an `=`. Every other non-blank line holds one point:
//!
//! ```text
//! (id, x, y, z, nx, ny, nz, ['Label1', 'Label2'], 'Y', [n1, n2, ...])
//! ```
//!
//! The edge token is `Y` for rim points. Neighbour ids may be written as
//! floats with a zero fraction.

use std::fs;
use std::path::Path;

use liner_types::{PointCloud, PointId, RegionLabels, SurfacePoint};
use nalgebra::{Point3, Vector3};
use tracing::info;

use crate::error::{open_error, IoError, IoResult};
use crate::format::parse_f64;

/// A parsed geometry file.
#[derive(Debug, Clone, PartialEq)]
pub struct LinerGeometry {
    /// The validated point cloud.
    pub cloud: PointCloud,
    /// Head radius declared in the header (mm), if any.
    pub default_head_radius: Option<f64>,
}

/// Read a geometry file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a record is malformed, or a
/// neighbour id does not resolve.
pub fn read_geometry<P: AsRef<Path>>(path: P) -> IoResult<LinerGeometry> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| open_error(path, e))?;
    let geometry = parse_geometry(&text)?;
    info!(
        path = %path.display(),
        points = geometry.cloud.len(),
        rim = geometry.cloud.edge_ids().count(),
        "Loaded liner geometry"
    );
    Ok(geometry)
}

/// Parse geometry text.
///
/// # Errors
///
/// See [`read_geometry`].
pub fn parse_geometry(text: &str) -> IoResult<LinerGeometry> {
    let mut lines = text.lines();
    let default_head_radius = lines.next().and_then(header_radius);

    let mut points = Vec::new();
    for (i, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // Header is line 1.
        points.push(parse_point(line, i + 2)?);
    }

    Ok(LinerGeometry {
        cloud: PointCloud::from_points(points)?,
        default_head_radius,
    })
}

fn header_radius(header: &str) -> Option<f64> {
    let (_, value) = header.split_once('=')?;
    let value = value.trim_start();
    let end = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

/// Text between `open` at or after `from` and the next `close`.
fn bracketed(line: &str, from: usize, open: char, close: char) -> Option<(usize, usize)> {
    let start = from + line[from..].find(open)? + open.len_utf8();
    let end = start + line[start..].find(close)?;
    Some((start, end))
}

fn parse_point(line: &str, number: usize) -> IoResult<SurfacePoint> {
    let malformed = |what: &str| IoError::parse(number, format!("malformed point record: {what}"));

    let (label_start, label_end) =
        bracketed(line, 0, '[', ']').ok_or_else(|| malformed("no region labels"))?;
    let (neighbor_start, neighbor_end) =
        bracketed(line, label_end, '[', ']').ok_or_else(|| malformed("no neighbour list"))?;

    let head = &line[..label_start - 1];
    let head = head
        .trim()
        .strip_prefix('(')
        .ok_or_else(|| malformed("missing '('"))?;
    let values: Vec<&str> = head.split(',').map(str::trim).filter(|v| !v.is_empty()).collect();
    if values.len() != 7 {
        return Err(malformed(&format!("expected 7 numbers, found {}", values.len())));
    }
    let id = parse_id(values[0], number)?;
    let mut coords = [0.0; 6];
    for (slot, value) in coords.iter_mut().zip(&values[1..]) {
        *slot = parse_f64(value, number, "coordinate")?;
    }

    let labels: Vec<&str> = line[label_start..label_end]
        .split(',')
        .map(|l| l.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|l| !l.is_empty())
        .collect();
    if labels.is_empty() {
        return Err(malformed("empty region label list"));
    }
    let regions = RegionLabels::from_labels(id, labels)?;

    let edge_token: String = line[label_end + 1..neighbor_start - 1]
        .chars()
        .filter(|c| !matches!(c, ',' | '\'' | '"') && !c.is_whitespace())
        .collect();

    let neighbors = line[neighbor_start..neighbor_end]
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| parse_id(n, number))
        .collect::<IoResult<Vec<_>>>()?;

    Ok(SurfacePoint::new(
        id,
        Point3::new(coords[0], coords[1], coords[2]),
        Vector3::new(coords[3], coords[4], coords[5]),
    )
    .with_regions(regions)
    .with_edge(edge_token == "Y")
    .with_neighbors(neighbors))
}

fn parse_id(field: &str, line: usize) -> IoResult<PointId> {
    if let Ok(raw) = field.parse::<u32>() {
        return Ok(PointId::new(raw));
    }
    let value = parse_f64(field, line, "point id")?;
    if value.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&value) {
        return Err(IoError::parse(line, format!("point id {field:?} is not a whole number")));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(PointId::new(value as u32))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use liner_types::CloudError;

    const SAMPLE: &str = "\
Axisymmetric liner, HeadRad = 14 mm
(1, 0.0, 0.0, 25.0, 0.0, 0.0, 1.0, ['EL_1'], 'Y', [2.0, 3.0])
(2, 1.0, 0.0, 25.0, 0.0, 0.0, 1.0, ['EL_1', 'Bearing'], 'Y', [1.0])

(3, 0.0, -1.0, 24.9, 0.0, -0.04, 1.0, ['Bearing'], 'N', [1])
";

    #[test]
    fn parses_points_and_header_radius() {
        let geometry = parse_geometry(SAMPLE).unwrap();
        assert_eq!(geometry.default_head_radius, Some(14.0));

        let cloud = &geometry.cloud;
        assert_eq!(cloud.len(), 3);
        let p2 = cloud.get(PointId::new(2)).unwrap();
        assert!(p2.edge);
        assert!(p2.is_boundary());
        assert_eq!(p2.regions.slot(1), "Bearing");
        assert_eq!(p2.neighbors, vec![PointId::new(1)]);

        let p3 = cloud.get(PointId::new(3)).unwrap();
        assert!(!p3.edge);
        assert_eq!(p3.position.y, -1.0);
        assert_eq!(p3.normal.y, -0.04);
        assert_eq!(cloud.edge_ids().count(), 2);
    }

    #[test]
    fn header_without_radius() {
        let geometry = parse_geometry("points\n(1, 0, 0, 0, 0, 1, 0, ['A'], 'N', [])\n").unwrap();
        assert_eq!(geometry.default_head_radius, None);
        assert!(geometry.cloud.neighbors_of(PointId::new(1)).is_empty());
    }

    #[test]
    fn dangling_neighbour_is_fatal() {
        let err = parse_geometry("h\n(1, 0, 0, 0, 0, 1, 0, ['A'], 'N', [9])\n").unwrap_err();
        assert!(matches!(
            err,
            IoError::Cloud(CloudError::DanglingNeighbor { .. })
        ));
    }

    #[test]
    fn short_tuple_reports_line() {
        let err = parse_geometry("h\n\n(1, 0, 0, 0, ['A'], 'N', [])\n").unwrap_err();
        match err {
            IoError::Parse { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("expected 7 numbers"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn fractional_neighbour_rejected() {
        let err = parse_geometry("h\n(1, 0, 0, 0, 0, 1, 0, ['A'], 'N', [1.5])\n").unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 2, .. }));
    }

    #[test]
    fn missing_file() {
        let err = read_geometry("no_such_liner_12345.txt").unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }
}
