//! Fixed-width report table
//!
//! Rows are written and flushed one at a time; nothing is buffered between
//! rows, so output order is exactly the order the caller renders in.

use std::io::{self, Write};

use crate::k8s::nodes::NodeRow;

/// Column widths: CTX | NAME | STATUS | ROLES | AGE | VERSION
pub const COLUMN_WIDTHS: [usize; 6] = [8, 30, 8, 12, 10, 10];

/// Glyph nesting a node row under its cluster row
pub const NODE_BRANCH: &str = "└─ ";

/// ROLES value on cluster-level rows
pub const CLUSTER_ROLE: &str = "CLUSTER";

pub struct ReportWriter<W: Write> {
    out: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn render_header(&mut self) -> io::Result<()> {
        self.render_row("CTX", "NAME", "STATUS", "ROLES", "AGE", "VERSION")
    }

    pub fn render_separator(&mut self) -> io::Result<()> {
        let line = COLUMN_WIDTHS
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-");
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }

    /// Write one left-aligned, pipe-separated row. Values wider than their
    /// column are written in full.
    pub fn render_row(
        &mut self,
        ctx: &str,
        name: &str,
        status: &str,
        roles: &str,
        age: &str,
        version: &str,
    ) -> io::Result<()> {
        let [c0, c1, c2, c3, c4, c5] = COLUMN_WIDTHS;
        let line = format!(
            "{:<c0$} | {:<c1$} | {:<c2$} | {:<c3$} | {:<c4$} | {:<c5$}",
            ctx, name, status, roles, age, version
        );
        writeln!(self.out, "{}", line.trim_end())?;
        self.out.flush()
    }

    pub fn render_cluster(
        &mut self,
        ctx: &str,
        cluster: &str,
        status: &str,
        age: &str,
    ) -> io::Result<()> {
        self.render_row(ctx, cluster, status, CLUSTER_ROLE, age, "-")
    }

    pub fn render_node(&mut self, row: &NodeRow) -> io::Result<()> {
        let name = format!("{}{}", NODE_BRANCH, row.name);
        self.render_row("", &name, &row.status, &row.roles, &row.age, &row.version)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
