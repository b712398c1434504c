//! Host information
//!
//! Core count and boot time of the machine running the conversion. Only
//! meaningful when the trace was captured on this host during this boot.

use anyhow::{bail, Context, Result};
use std::fs;

use crate::domain::CpuId;

const POSSIBLE_CPUS_PATH: &str = "/sys/devices/system/cpu/possible";
const PROC_STAT_PATH: &str = "/proc/stat";

/// Parse a CPU range list such as `0-3` or `0-3,8-11`
pub fn parse_cpu_list(content: &str) -> Result<Vec<CpuId>> {
    let mut cpus = Vec::new();

    for range in content.trim().split(',').filter(|r| !r.is_empty()) {
        if let Some((start, end)) = range.split_once('-') {
            let start: u32 = start.trim().parse().with_context(|| format!("bad CPU range {range}"))?;
            let end: u32 = end.trim().parse().with_context(|| format!("bad CPU range {range}"))?;
            if end < start {
                bail!("bad CPU range {range}");
            }
            cpus.extend((start..=end).map(CpuId));
        } else {
            let cpu: u32 = range.trim().parse().with_context(|| format!("bad CPU id {range}"))?;
            cpus.push(CpuId(cpu));
        }
    }

    Ok(cpus)
}

/// CPUs listed in /sys/devices/system/cpu/possible
pub fn possible_cpus() -> Result<Vec<CpuId>> {
    let content = fs::read_to_string(POSSIBLE_CPUS_PATH)
        .with_context(|| format!("Failed to read {POSSIBLE_CPUS_PATH}"))?;
    parse_cpu_list(&content)
}

/// Extract `btime` (boot time, epoch seconds) from /proc/stat content
pub fn parse_boot_time(stat: &str) -> Option<u64> {
    stat.lines()
        .find_map(|line| line.strip_prefix("btime"))
        .and_then(|rest| rest.trim().parse().ok())
}

pub fn boot_time_secs() -> Result<u64> {
    let stat = fs::read_to_string(PROC_STAT_PATH)
        .with_context(|| format!("Failed to read {PROC_STAT_PATH}"))?;
    parse_boot_time(&stat).with_context(|| format!("No btime entry in {PROC_STAT_PATH}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cpu_list() {
        let cpus = parse_cpu_list("0-3,8-9\n").unwrap();
        assert_eq!(
            cpus,
            vec![CpuId(0), CpuId(1), CpuId(2), CpuId(3), CpuId(8), CpuId(9)]
        );
        assert_eq!(parse_cpu_list("5").unwrap(), vec![CpuId(5)]);
        assert!(parse_cpu_list("3-1").is_err());
        assert!(parse_cpu_list("x").is_err());
    }

    #[test]
    fn test_parse_boot_time() {
        let stat = "cpu  1 2 3\nintr 5\nbtime 1700000000\nprocesses 99\n";
        assert_eq!(parse_boot_time(stat), Some(1_700_000_000));
        assert_eq!(parse_boot_time("cpu 1 2 3\n"), None);
    }

    #[test]
    fn test_possible_cpus() {
        let result = possible_cpus();

        #[cfg(target_os = "linux")]
        {
            if let Ok(cpus) = result {
                assert!(cpus.contains(&CpuId(0)));
                for i in 1..cpus.len() {
                    assert!(cpus[i].0 > cpus[i - 1].0);
                }
            }
        }

        #[cfg(not(target_os = "linux"))]
        {
            assert!(result.is_err());
        }
    }
}
