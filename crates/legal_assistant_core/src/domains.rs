//! crates/legal_assistant_core/src/domains.rs
//!
//! The static catalog of legal domains used to route queries and label documents.

/// A legal subject area the backend can answer questions about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Domain {
    /// Stable key sent to the backend.
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// Opaque presentation tag for the front end.
    pub style: &'static str,
}

const LEGAL_DOMAINS: [Domain; 10] = [
    Domain {
        value: "general",
        label: "General Law",
        description: "General legal queries and basic law concepts",
        style: "gray",
    },
    Domain {
        value: "criminal",
        label: "Criminal Law",
        description: "Criminal offenses, procedures, and penalties",
        style: "red",
    },
    Domain {
        value: "corporate",
        label: "Corporate Law",
        description: "Business law, companies act, and corporate governance",
        style: "blue",
    },
    Domain {
        value: "it",
        label: "IT Law",
        description: "Technology law, cyber security, and digital rights",
        style: "purple",
    },
    Domain {
        value: "family",
        label: "Family Law",
        description: "Marriage, divorce, custody, and family matters",
        style: "pink",
    },
    Domain {
        value: "property",
        label: "Property Law",
        description: "Real estate, land rights, and property transactions",
        style: "green",
    },
    Domain {
        value: "labor",
        label: "Labor Law",
        description: "Employment law, workplace rights, and labor disputes",
        style: "yellow",
    },
    Domain {
        value: "tax",
        label: "Tax Law",
        description: "Taxation, financial regulations, and compliance",
        style: "indigo",
    },
    Domain {
        value: "constitutional",
        label: "Constitutional Law",
        description: "Constitutional rights, duties, and fundamental principles",
        style: "orange",
    },
    Domain {
        value: "environmental",
        label: "Environmental Law",
        description: "Environmental protection, regulations, and sustainability",
        style: "emerald",
    },
];

/// Every domain, in selector order.
pub fn list() -> &'static [Domain] {
    &LEGAL_DOMAINS
}

pub fn find(value: &str) -> Option<&'static Domain> {
    LEGAL_DOMAINS.iter().find(|domain| domain.value == value)
}

/// The domain a fresh session starts on.
pub fn default_domain() -> &'static Domain {
    &LEGAL_DOMAINS[0]
}

/// Display label for `value`, or the value itself when it is not in the catalog.
pub fn label_for(value: &str) -> &str {
    find(value).map(|domain| domain.label).unwrap_or(value)
}
