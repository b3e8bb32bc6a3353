//! Heuristic extraction of hardware attributes from rendered page text.
//!
//! Every rule is a fixed regex taking the first (leftmost) match over the
//! whole text. The text is expected to be what a browser reports as
//! `document.body.innerText`, so line breaks separate what the page renders
//! as separate rows, and several rules rely on `.` stopping at a newline.

use std::sync::LazyLock;

use regex::Regex;

use crate::field::FieldMap;

static SOCKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(LGA\s*\d{4})(.*?Socket\s*[\w+]+)?").unwrap());
static CPU_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(single|dual|quad|2|4)[-\s]*(processor|cpu)").unwrap());
static TDP_WATTS_FIRST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{2,4})\s*w.*?tdp").unwrap());
static TDP_LABEL_FIRST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)tdp.*?(\d{2,4})\s*w").unwrap());
static MEMORY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(ddr[345][^\n]*)").unwrap());
static DIMM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*x\s*dimm").unwrap());
static PSU_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*x\s*(\d{3,4})\s*w").unwrap());
static RACK_UNIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b([1-8][Uu])\b").unwrap());
static DRIVE_BAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*x\s*2\.5.*?(nvme|sata)").unwrap());
static M2_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\d+\s*x\s*m\.2[^\n]*").unwrap());

/// Runs every rule over the text and returns whatever was found. The CPU
/// count is always set; the TDP total is derived from the max TDP and the
/// count, so it is present exactly when the max is.
pub fn extract(text: &str) -> FieldMap {
    let count = cpu_count(text);
    let max_watts = max_tdp_watts(text);
    FieldMap {
        cpu_socket: cpu_socket(text),
        cpu_count: count.to_string(),
        max_tdp: max_watts.map(|watts| format!("{watts}W")),
        total_tdp: max_watts.map(|watts| format!("{}W", watts * count)),
        memory_type: memory_type(text),
        dimm_slots: dimm_slots(text),
        power_supply: power_supply(text),
        rack_unit: rack_unit(text),
        drive_bays: drive_bays(text),
        m2_slots: m2_slots(text),
    }
}

/// `LGA` plus four digits, with a same-line `Socket ...` qualifier appended
/// when present. The qualifier token also admits `+` so names like `P+` come
/// through whole.
fn cpu_socket(text: &str) -> Option<String> {
    let caps = SOCKET_RE.captures(text)?;
    let mut socket = caps[1].to_string();
    if let Some(qualifier) = caps.get(2) {
        socket.push(' ');
        socket.push_str(qualifier.as_str().trim());
    }
    Some(socket)
}

/// Word or digit cue next to a processor/CPU noun. No cue means a single
/// socket. The digit cues are taken at face value, so unrelated hardware
/// counts ("4 CPU fan headers") are read as socket counts too.
fn cpu_count(text: &str) -> u32 {
    let Some(caps) = CPU_COUNT_RE.captures(text) else {
        return 1;
    };
    match caps[1].to_ascii_lowercase().as_str() {
        "dual" | "2" => 2,
        "quad" | "4" => 4,
        _ => 1,
    }
}

/// Wattage within line range of a TDP token. The watts-first ordering is
/// preferred; the label-first ordering is only consulted when the first finds
/// nothing anywhere in the text.
fn max_tdp_watts(text: &str) -> Option<u32> {
    let caps = TDP_WATTS_FIRST_RE
        .captures(text)
        .or_else(|| TDP_LABEL_FIRST_RE.captures(text))?;
    caps[1].parse().ok()
}

fn memory_type(text: &str) -> Option<String> {
    MEMORY_RE.captures(text).map(|caps| caps[1].to_string())
}

fn dimm_slots(text: &str) -> Option<String> {
    DIMM_RE.captures(text).map(|caps| caps[1].to_string())
}

/// Supply count and wattage, normalized to `{count} x {watts}W` with the
/// count reduced to its numeric value and the unit always a capital W.
fn power_supply(text: &str) -> Option<String> {
    let caps = PSU_RE.captures(text)?;
    let count: u32 = caps[1].parse().ok()?;
    Some(format!("{} x {}W", count, &caps[2]))
}

fn rack_unit(text: &str) -> Option<String> {
    RACK_UNIT_RE
        .captures(text)
        .map(|caps| caps[1].to_uppercase())
}

/// Counted 2.5" bays, only when an interface keyword confirms the line is
/// about drives.
fn drive_bays(text: &str) -> Option<String> {
    DRIVE_BAY_RE.captures(text).map(|caps| caps[1].to_string())
}

/// Every `N x M.2 ...` mention counts as one slot.
fn m2_slots(text: &str) -> Option<String> {
    let count = M2_RE.find_iter(text).count();
    if count == 0 {
        None
    } else {
        Some(format!("{count} detected"))
    }
}
