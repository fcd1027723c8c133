#![allow(dead_code)]

use std::fmt::Write as _;

/// FEFLOW-style text for a structured `nx` x `ny` quad mesh over
/// `[x0, x1] x [y0, y1]`.
///
/// Elements are written counter-clockwise (as FEFLOW does), vertices row by
/// row from the bottom-left corner. Coordinates wrap every `per_line` values
/// and every line ends with a trailing comma.
pub fn quad_mesh_text(nx: usize, ny: usize, x0: f64, x1: f64, y0: f64, y1: f64) -> String {
    let nodes = (nx + 1) * (ny + 1);
    let elements = nx * ny;
    let node = |i: usize, j: usize| j * (nx + 1) + i + 1;

    let mut out = String::new();
    writeln!(out, "PROBLEM: structured test mesh").unwrap();
    writeln!(out, "CLASS (v.5.3)").unwrap();
    writeln!(out, "   0    0    0    3    0    0    8    8    0    0").unwrap();
    writeln!(out, "DIMENS").unwrap();
    writeln!(out, "  {nodes}  {elements}  0  1  0  0  0  0  0  1  0  0").unwrap();
    writeln!(out, "SCALE").unwrap();
    writeln!(out, "NODE").unwrap();
    for j in 0..ny {
        for i in 0..nx {
            writeln!(
                out,
                " {} {} {} {}",
                node(i, j),
                node(i + 1, j),
                node(i + 1, j + 1),
                node(i, j + 1)
            )
            .unwrap();
        }
    }

    let dx = (x1 - x0) / nx as f64;
    let dy = (y1 - y0) / ny as f64;
    let mut xs = Vec::with_capacity(nodes);
    let mut ys = Vec::with_capacity(nodes);
    for j in 0..=ny {
        for i in 0..=nx {
            xs.push(x0 + i as f64 * dx);
            ys.push(y0 + j as f64 * dy);
        }
    }

    writeln!(out, "COOR").unwrap();
    let per_line = 4;
    for chunk in xs.chunks(per_line).chain(ys.chunks(per_line)) {
        let line: Vec<String> = chunk.iter().map(|v| format!("{v:.6}")).collect();
        writeln!(out, " {},", line.join(", ")).unwrap();
    }
    writeln!(out, "GK_COOR").unwrap();
    writeln!(out, " 0, 0, 0,").unwrap();
    writeln!(out, "ELEV_I").unwrap();
    out
}
