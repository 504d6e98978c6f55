//! Sheet schemas
//!
//! One fixed table per sheet: which record field lands in which column, and
//! how wide that column is. Header cells carry the field name.

/// One column of a sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub field: &'static str,
    pub index: u16,
    pub width: f64,
}

const fn col(field: &'static str, index: u16, width: f64) -> Column {
    Column {
        field,
        index,
        width,
    }
}

/// Sheet type tag, one per resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SheetKind {
    Volumes,
    Initiators,
    InitiatorGroups,
    CascadedInitiatorGroups,
    MaskingViews,
    PortGroups,
    StoragePools,
    StorageGroups,
    ArrayDetails,
}

const VOLUME_COLUMNS: &[Column] = &[
    col("volumeId", 0, 15.0),
    col("wwn", 1, 35.0),
    col("effective_wwn", 2, 35.0),
    col("cap_gb", 3, 13.0),
    col("cap_mb", 4, 13.0),
    col("cap_cyl", 5, 13.0),
    col("allocated_percent", 6, 20.0),
    col("type", 7, 15.0),
    col("snapvx_source", 8, 15.0),
    col("snapvx_target", 9, 15.0),
    col("status", 10, 15.0),
    col("storageGroupId", 11, 40.0),
    col("emulation", 12, 12.0),
    col("num_of_storage_groups", 13, 27.0),
];

const INITIATOR_COLUMNS: &[Column] = &[
    col("initiatorId", 0, 20.0),
    col("alias", 1, 40.0),
    col("host", 2, 20.0),
    col("logged_in", 3, 15.0),
    col("on_fabric", 4, 15.0),
    col("maskingview", 5, 40.0),
    col("port_flags_override", 6, 23.0),
    col("flags_in_effect", 7, 90.0),
    col("num_of_vols", 8, 15.0),
];

const INITIATOR_GROUP_COLUMNS: &[Column] = &[
    col("hostId", 0, 30.0),
    col("initiator", 1, 100.0),
    col("consistent_lun", 2, 21.0),
    col("num_of_initiators", 3, 21.0),
    col("maskingview", 4, 40.0),
    col("port_flags_override", 5, 21.0),
];

const CASCADED_GROUP_COLUMNS: &[Column] = &[
    col("hostGroupId", 0, 40.0),
    col("host", 1, 70.0),
    col("consistent_lun", 2, 20.0),
    col("port_flags_override", 3, 25.0),
    col("num_of_hosts", 4, 20.0),
    col("num_of_masking_views", 5, 25.0),
];

const MASKING_VIEW_COLUMNS: &[Column] = &[
    col("maskingViewId", 0, 40.0),
    col("hostId", 1, 40.0),
    col("portGroupId", 2, 40.0),
    col("storageGroupId", 3, 40.0),
];

const PORT_GROUP_COLUMNS: &[Column] = &[
    col("portGroupId", 0, 30.0),
    col("symmetrixPortKey", 1, 100.0),
    col("num_of_ports", 2, 15.0),
    col("num_of_masking_views", 3, 25.0),
    col("maskingview", 4, 90.0),
];

const STORAGE_POOL_COLUMNS: &[Column] = &[
    col("srpId", 0, 15.0),
    col("emulation", 1, 15.0),
    col("total_usable_cap_gb", 2, 25.0),
    col("total_subscribed_cap_gb", 3, 25.0),
    col("total_allocated_cap_gb", 4, 25.0),
    col("effective_used_capacity_percent", 5, 35.0),
    col("compression_overall_ratio_to_one", 6, 35.0),
    col("compression_vp_ratio_to_one", 7, 35.0),
    col("total_snapshot_allocated_cap_gb", 8, 35.0),
    col("vp_saved_percent", 9, 25.0),
];

const STORAGE_GROUP_COLUMNS: &[Column] = &[
    col("storageGroupId", 0, 25.0),
    col("num_of_vols", 1, 16.0),
    col("cap_gb", 2, 16.0),
    col("VPSaved", 3, 15.0),
    col("compressionRatio", 4, 20.0),
    col("device_emulation", 5, 21.0),
    col("srp", 6, 20.0),
    col("type", 7, 16.0),
    col("slo", 8, 15.0),
    col("maskingview", 9, 50.0),
    col("num_of_parent_sgs", 10, 20.0),
    col("num_of_snapshots", 11, 21.0),
    col("num_of_child_sgs", 12, 20.0),
];

const ARRAY_COLUMNS: &[Column] = &[
    col("symmetrixId", 0, 20.0),
    col("model", 1, 15.0),
    col("ucode", 2, 15.0),
    col("total_usable_cap_gb", 3, 25.0),
    col("total_subscribed_cap_gb", 4, 25.0),
    col("total_allocated_cap_gb", 5, 25.0),
    col("default_fba_srp", 6, 20.0),
    col("effective_used_capacity_percent", 7, 35.0),
    col("VP_saved_percent", 8, 20.0),
    col("host_visible_device_count", 9, 25.0),
    col("compression_enabled", 10, 20.0),
    col("device_count", 11, 20.0),
    col("system_meta_data_used_percent", 12, 35.0),
];

impl SheetKind {
    pub const ALL: [SheetKind; 9] = [
        SheetKind::Volumes,
        SheetKind::Initiators,
        SheetKind::InitiatorGroups,
        SheetKind::CascadedInitiatorGroups,
        SheetKind::MaskingViews,
        SheetKind::PortGroups,
        SheetKind::StoragePools,
        SheetKind::StorageGroups,
        SheetKind::ArrayDetails,
    ];

    /// Tab name in the workbook
    pub fn name(self) -> &'static str {
        match self {
            SheetKind::Volumes => "TDEV",
            SheetKind::Initiators => "Initiators",
            SheetKind::InitiatorGroups => "Initiator Groups",
            SheetKind::CascadedInitiatorGroups => "Cascaded IG",
            SheetKind::MaskingViews => "Masking Views",
            SheetKind::PortGroups => "Port Groups",
            SheetKind::StoragePools => "SRP",
            SheetKind::StorageGroups => "Storage Group",
            SheetKind::ArrayDetails => "Vmax Details",
        }
    }

    pub fn columns(self) -> &'static [Column] {
        match self {
            SheetKind::Volumes => VOLUME_COLUMNS,
            SheetKind::Initiators => INITIATOR_COLUMNS,
            SheetKind::InitiatorGroups => INITIATOR_GROUP_COLUMNS,
            SheetKind::CascadedInitiatorGroups => CASCADED_GROUP_COLUMNS,
            SheetKind::MaskingViews => MASKING_VIEW_COLUMNS,
            SheetKind::PortGroups => PORT_GROUP_COLUMNS,
            SheetKind::StoragePools => STORAGE_POOL_COLUMNS,
            SheetKind::StorageGroups => STORAGE_GROUP_COLUMNS,
            SheetKind::ArrayDetails => ARRAY_COLUMNS,
        }
    }

    /// Highest column index used by the sheet
    pub fn last_column(self) -> u16 {
        self.columns().iter().map(|c| c.index).max().unwrap_or(0)
    }
}
