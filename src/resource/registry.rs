//! Resource Registry - static description of every Unisphere resource type
//!
//! Each entry names the REST endpoint, the identifying key of one object and
//! where the listing puts those keys, so the rest of the crate can treat all
//! resource types the same way.

use crate::report::SheetKind;
use std::fmt;

/// REST category a resource lives under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// `/<version>/sloprovisioning/symmetrix/<sid>/<endpoint>`
    SloProvisioning,
    /// `/<version>/system/<endpoint>`
    System,
}

/// Resource type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceType {
    StoragePool,
    Volume,
    Initiator,
    MaskingView,
    InitiatorGroup,
    CascadedInitiatorGroup,
    PortGroup,
    StorageGroup,
    Array,
}

/// Static definition of one resource type
#[derive(Debug, Clone)]
pub struct ResourceDef {
    pub display_name: &'static str,
    pub category: Category,
    pub endpoint: &'static str,
    /// Field holding the identifying key in a detail record
    pub id_field: &'static str,
    /// Dot-separated path to the list of keys in the listing body
    pub response_path: &'static str,
    /// When set, the listing holds objects and the key is this field of each one
    pub item_key: Option<&'static str>,
    /// Query parameters sent with the list call
    pub list_filters: &'static [(&'static str, &'static str)],
    pub sheet: SheetKind,
}

const STORAGE_POOL: ResourceDef = ResourceDef {
    display_name: "SRPs",
    category: Category::SloProvisioning,
    endpoint: "srp",
    id_field: "srpId",
    response_path: "srpId",
    item_key: None,
    list_filters: &[],
    sheet: SheetKind::StoragePools,
};

// The volume listing is wrapped in a result list envelope, unlike the other
// endpoints which return a flat array of keys.
const VOLUME: ResourceDef = ResourceDef {
    display_name: "TDEVs",
    category: Category::SloProvisioning,
    endpoint: "volume",
    id_field: "volumeId",
    response_path: "resultList.result",
    item_key: Some("volumeId"),
    list_filters: &[("tdev", "true")],
    sheet: SheetKind::Volumes,
};

const INITIATOR: ResourceDef = ResourceDef {
    display_name: "initiators",
    category: Category::SloProvisioning,
    endpoint: "initiator",
    id_field: "initiatorId",
    response_path: "initiatorId",
    item_key: None,
    list_filters: &[],
    sheet: SheetKind::Initiators,
};

const MASKING_VIEW: ResourceDef = ResourceDef {
    display_name: "masking views",
    category: Category::SloProvisioning,
    endpoint: "maskingview",
    id_field: "maskingViewId",
    response_path: "maskingViewId",
    item_key: None,
    list_filters: &[],
    sheet: SheetKind::MaskingViews,
};

const INITIATOR_GROUP: ResourceDef = ResourceDef {
    display_name: "initiator groups",
    category: Category::SloProvisioning,
    endpoint: "host",
    id_field: "hostId",
    response_path: "hostId",
    item_key: None,
    list_filters: &[],
    sheet: SheetKind::InitiatorGroups,
};

const CASCADED_INITIATOR_GROUP: ResourceDef = ResourceDef {
    display_name: "cascaded initiator groups",
    category: Category::SloProvisioning,
    endpoint: "hostgroup",
    id_field: "hostGroupId",
    response_path: "hostGroupId",
    item_key: None,
    list_filters: &[],
    sheet: SheetKind::CascadedInitiatorGroups,
};

const PORT_GROUP: ResourceDef = ResourceDef {
    display_name: "port groups",
    category: Category::SloProvisioning,
    endpoint: "portgroup",
    id_field: "portGroupId",
    response_path: "portGroupId",
    item_key: None,
    list_filters: &[],
    sheet: SheetKind::PortGroups,
};

const STORAGE_GROUP: ResourceDef = ResourceDef {
    display_name: "storage groups",
    category: Category::SloProvisioning,
    endpoint: "storagegroup",
    id_field: "storageGroupId",
    response_path: "storageGroupId",
    item_key: None,
    list_filters: &[],
    sheet: SheetKind::StorageGroups,
};

const ARRAY: ResourceDef = ResourceDef {
    display_name: "array details",
    category: Category::System,
    endpoint: "symmetrix",
    id_field: "symmetrixId",
    response_path: "symmetrixId",
    item_key: None,
    list_filters: &[],
    sheet: SheetKind::ArrayDetails,
};

impl ResourceType {
    /// Every resource type, in no particular order
    pub const ALL: [ResourceType; 9] = [
        ResourceType::StoragePool,
        ResourceType::Volume,
        ResourceType::Initiator,
        ResourceType::MaskingView,
        ResourceType::InitiatorGroup,
        ResourceType::CascadedInitiatorGroup,
        ResourceType::PortGroup,
        ResourceType::StorageGroup,
        ResourceType::Array,
    ];

    pub fn def(self) -> &'static ResourceDef {
        match self {
            ResourceType::StoragePool => &STORAGE_POOL,
            ResourceType::Volume => &VOLUME,
            ResourceType::Initiator => &INITIATOR,
            ResourceType::MaskingView => &MASKING_VIEW,
            ResourceType::InitiatorGroup => &INITIATOR_GROUP,
            ResourceType::CascadedInitiatorGroup => &CASCADED_INITIATOR_GROUP,
            ResourceType::PortGroup => &PORT_GROUP,
            ResourceType::StorageGroup => &STORAGE_GROUP,
            ResourceType::Array => &ARRAY,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.def().display_name)
    }
}
