/// The ten hardware attributes a page can yield, in canonical column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecField {
    CpuSocket,
    CpuCount,
    MaxTdp,
    TotalTdp,
    MemoryType,
    DimmSlots,
    PowerSupply,
    RackUnit,
    DriveBays,
    M2Slots,
}

impl SpecField {
    pub const ALL: [SpecField; 10] = [
        SpecField::CpuSocket,
        SpecField::CpuCount,
        SpecField::MaxTdp,
        SpecField::TotalTdp,
        SpecField::MemoryType,
        SpecField::DimmSlots,
        SpecField::PowerSupply,
        SpecField::RackUnit,
        SpecField::DriveBays,
        SpecField::M2Slots,
    ];

    /// Name used as the JSON key in API responses.
    pub fn display_name(self) -> &'static str {
        match self {
            SpecField::CpuSocket => "CPU Socket",
            SpecField::CpuCount => "CPU Count",
            SpecField::MaxTdp => "Max TDP",
            SpecField::TotalTdp => "Total TDP",
            SpecField::MemoryType => "Memory Type",
            SpecField::DimmSlots => "DIMM Slots",
            SpecField::PowerSupply => "Power Supply",
            SpecField::RackUnit => "Rack Unit",
            SpecField::DriveBays => "2.5\" Drive Bays",
            SpecField::M2Slots => "M.2 Slots",
        }
    }

    /// Column title in exported workbooks. Matches `display_name` except for
    /// the drive-bay column, which drops the form-factor prefix.
    pub fn export_header(self) -> &'static str {
        match self {
            SpecField::DriveBays => "Drive Bays",
            other => other.display_name(),
        }
    }
}

/// Extracted values for one page. Every attribute except the CPU count is
/// optional; the count defaults to one socket when the page gives no cue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    pub cpu_socket: Option<String>,
    pub cpu_count: String,
    pub max_tdp: Option<String>,
    pub total_tdp: Option<String>,
    pub memory_type: Option<String>,
    pub dimm_slots: Option<String>,
    pub power_supply: Option<String>,
    pub rack_unit: Option<String>,
    pub drive_bays: Option<String>,
    pub m2_slots: Option<String>,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            cpu_socket: None,
            cpu_count: "1".to_string(),
            max_tdp: None,
            total_tdp: None,
            memory_type: None,
            dimm_slots: None,
            power_supply: None,
            rack_unit: None,
            drive_bays: None,
            m2_slots: None,
        }
    }
}

impl FieldMap {
    pub fn get(&self, field: SpecField) -> Option<&str> {
        match field {
            SpecField::CpuSocket => self.cpu_socket.as_deref(),
            SpecField::CpuCount => Some(self.cpu_count.as_str()),
            SpecField::MaxTdp => self.max_tdp.as_deref(),
            SpecField::TotalTdp => self.total_tdp.as_deref(),
            SpecField::MemoryType => self.memory_type.as_deref(),
            SpecField::DimmSlots => self.dimm_slots.as_deref(),
            SpecField::PowerSupply => self.power_supply.as_deref(),
            SpecField::RackUnit => self.rack_unit.as_deref(),
            SpecField::DriveBays => self.drive_bays.as_deref(),
            SpecField::M2Slots => self.m2_slots.as_deref(),
        }
    }
}
