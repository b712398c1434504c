//! Debug dumps
//!
//! With node retention enabled, the parsed nodes, the track-name maps and
//! the group catalog are written as plain text next to the report. Dumps
//! are best-effort: a failing file is reported and skipped.

use super::event_processor::RetainedNodes;
use crate::analysis::{GroupCatalog, MetadataTracker};
use log::{info, warn};
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const DUMP_PREFIX: &str = "session-report";

/// Run state kept for the dumps
#[derive(Debug, Default, Clone)]
pub struct DebugSnapshot {
    pub nodes: RetainedNodes,
    pub metadata: MetadataTracker,
    pub groups: GroupCatalog,
}

/// Write every dump file into `dir`; returns the files that were written
pub fn write_dumps(dir: &Path, snapshot: &DebugSnapshot) -> Vec<PathBuf> {
    let mut written = Vec::new();
    let metadata = &snapshot.metadata;

    dump(dir, "user.dat", &mut written, |out| write_nodes(out, &snapshot.nodes.legacy));
    dump(dir, "user.new.dat", &mut written, |out| {
        write_nodes(out, &snapshot.nodes.structured)
    });
    dump(dir, "kernel.dat", &mut written, |out| write_nodes(out, &snapshot.nodes.kernel));
    dump(dir, "meta.pid", &mut written, |out| {
        for (pid, name) in metadata.process_names() {
            writeln!(out, "pid : {}, procname : {name}", pid.0)?;
        }
        Ok(())
    });
    dump(dir, "meta.tid", &mut written, |out| {
        for (tid, name) in metadata.thread_names() {
            writeln!(out, "tid : {}, procname : {name}", tid.0)?;
        }
        Ok(())
    });
    dump(dir, "meta.tidpid", &mut written, |out| {
        for (tid, pid) in metadata.thread_pids() {
            writeln!(out, "tid : {}, pid : {}", tid.0, pid.0)?;
        }
        Ok(())
    });
    dump(dir, "group.info", &mut written, |out| write_groups(out, &snapshot.groups));

    info!("{} debug dumps written to {}", written.len(), dir.display());
    written
}

fn dump<F>(dir: &Path, suffix: &str, written: &mut Vec<PathBuf>, body: F)
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let path = dir.join(format!("{DUMP_PREFIX}.{suffix}"));
    let result = File::create(&path).and_then(|file| {
        let mut out = BufWriter::new(file);
        body(&mut out)?;
        out.flush()
    });
    match result {
        Ok(()) => written.push(path),
        Err(e) => warn!("Failed to write debug dump {}: {e}", path.display()),
    }
}

fn write_nodes<T: Display>(out: &mut impl Write, nodes: &[T]) -> io::Result<()> {
    for node in nodes {
        writeln!(out, "{node}\n")?;
    }
    Ok(())
}

fn write_groups(out: &mut impl Write, groups: &GroupCatalog) -> io::Result<()> {
    for group in groups.groups() {
        writeln!(out, "group : {}, pid : {}", group.name, group.pid.0)?;
    }
    for entry in groups.entries() {
        writeln!(
            out,
            "event : tid({}) name({}) process({}) physical({}) logical({})",
            entry.tid.0, entry.group, entry.process, entry.physical, entry.logical
        )?;
    }
    Ok(())
}
