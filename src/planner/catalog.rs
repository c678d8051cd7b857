//! Static planning tables: phase templates, phase risks and mitigation actions.
//!
//! Every table is an exhaustive `match` over `Strategy`, `Phase` or
//! `RiskCategory`, so a new variant cannot be added without deciding its
//! content here.

use serde::Serialize;

use super::types::{PhaseMitigation, PhaseRisk, RiskCategory};
use crate::inventory::{Level, Strategy};

/// Ordered stages of a single server's migration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Phase {
    Assessment,
    Planning,
    Preparation,
    Migration,
    Validation,
    Cutover,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::Assessment,
        Phase::Planning,
        Phase::Preparation,
        Phase::Migration,
        Phase::Validation,
        Phase::Cutover,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Phase::Assessment => "Assessment",
            Phase::Planning => "Planning",
            Phase::Preparation => "Preparation",
            Phase::Migration => "Migration",
            Phase::Validation => "Validation",
            Phase::Cutover => "Cutover",
        }
    }

    /// Risks every strategy faces in this phase
    pub fn baseline_risks(self) -> &'static [PhaseRisk] {
        match self {
            Phase::Assessment => &[
                PhaseRisk {
                    kind: "Incomplete Discovery",
                    description: "Missing critical components or dependencies",
                    severity: Level::High,
                    mitigation: "Multiple discovery tools and manual verification",
                },
                PhaseRisk {
                    kind: "Inaccurate Baseline",
                    description: "Performance baseline not representative",
                    severity: Level::Medium,
                    mitigation: "Extended baseline monitoring period",
                },
            ],
            Phase::Planning => &[
                PhaseRisk {
                    kind: "Resource Availability",
                    description: "Required resources not available when needed",
                    severity: Level::Medium,
                    mitigation: "Early resource booking and backup resource identification",
                },
                PhaseRisk {
                    kind: "Schedule Conflicts",
                    description: "Conflicts with other business initiatives",
                    severity: Level::Medium,
                    mitigation: "Stakeholder alignment and schedule buffering",
                },
            ],
            Phase::Preparation => &[
                PhaseRisk {
                    kind: "Environment Setup",
                    description: "Target environment configuration issues",
                    severity: Level::Medium,
                    mitigation: "Automated environment validation and testing",
                },
                PhaseRisk {
                    kind: "Tool Compatibility",
                    description: "Migration tools compatibility issues",
                    severity: Level::High,
                    mitigation: "Pre-migration tool testing and validation",
                },
            ],
            Phase::Migration => &[
                PhaseRisk {
                    kind: "Data Transfer",
                    description: "Data transfer failures or corruption",
                    severity: Level::High,
                    mitigation: "Checksums and incremental transfer validation",
                },
                PhaseRisk {
                    kind: "Extended Downtime",
                    description: "Migration takes longer than planned window",
                    severity: Level::High,
                    mitigation: "Detailed rehearsal and rollback procedures",
                },
            ],
            Phase::Validation => &[
                PhaseRisk {
                    kind: "Test Coverage",
                    description: "Insufficient testing scenarios",
                    severity: Level::Medium,
                    mitigation: "Comprehensive test plan with business validation",
                },
                PhaseRisk {
                    kind: "Performance Issues",
                    description: "Performance not meeting requirements",
                    severity: Level::High,
                    mitigation: "Performance testing and optimization cycles",
                },
            ],
            Phase::Cutover => &[
                PhaseRisk {
                    kind: "Service Disruption",
                    description: "Unexpected service disruption during cutover",
                    severity: Level::High,
                    mitigation: "Detailed cutover plan with rollback points",
                },
                PhaseRisk {
                    kind: "Data Synchronization",
                    description: "Final data sync issues",
                    severity: Level::High,
                    mitigation: "Multiple sync verification points",
                },
            ],
        }
    }

    pub fn baseline_mitigations(self) -> &'static [PhaseMitigation] {
        match self {
            Phase::Assessment => &[PhaseMitigation {
                category: "Discovery",
                actions: &[
                    "Use multiple discovery tools",
                    "Conduct manual verification",
                    "Validate with stakeholders",
                ],
                verification: "Complete discovery sign-off checklist",
            }],
            Phase::Planning => &[PhaseMitigation {
                category: "Resource Management",
                actions: &[
                    "Create detailed resource plan",
                    "Identify backup resources",
                    "Establish escalation paths",
                ],
                verification: "Resource availability confirmation",
            }],
            Phase::Preparation => &[PhaseMitigation {
                category: "Environment Readiness",
                actions: &[
                    "Automate target environment provisioning",
                    "Dry-run migration tooling against a sample workload",
                    "Verify backups by test restore",
                ],
                verification: "Environment readiness checklist signed off",
            }],
            Phase::Migration => &[PhaseMitigation {
                category: "Data Integrity",
                actions: &[
                    "Checksum every transferred dataset",
                    "Transfer incrementally with validation gates",
                    "Keep rollback snapshots until validation completes",
                ],
                verification: "Source and target checksums match",
            }],
            Phase::Validation => &[PhaseMitigation {
                category: "Quality Assurance",
                actions: &[
                    "Execute functional and regression test suites",
                    "Compare performance against the recorded baseline",
                    "Collect business owner acceptance",
                ],
                verification: "Test and UAT sign-off recorded",
            }],
            Phase::Cutover => &[PhaseMitigation {
                category: "Cutover Control",
                actions: &[
                    "Run the cutover from a rehearsed runbook",
                    "Define go/no-go checkpoints with rollback triggers",
                    "Staff a hypercare rotation for the first week",
                ],
                verification: "Go-live checklist completed without critical issues",
            }],
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A phase as declared by a strategy template, before scheduling
#[derive(Debug, Clone, Copy)]
pub struct PhaseTemplate {
    pub phase: Phase,
    pub base_days: u32,
    pub tasks: &'static [&'static str],
    pub deliverables: &'static [&'static str],
    pub validation: &'static [&'static str],
}

static REHOST_TEMPLATE: [PhaseTemplate; 6] = [
    PhaseTemplate {
        phase: Phase::Assessment,
        base_days: 5,
        tasks: &[
            "Infrastructure assessment",
            "Dependency mapping",
            "Performance baseline creation",
            "Migration tool selection",
        ],
        deliverables: &[
            "Assessment report",
            "Dependency map",
            "Performance baseline document",
        ],
        validation: &[
            "Infrastructure compatibility verified",
            "All dependencies identified",
            "Baseline metrics established",
        ],
    },
    PhaseTemplate {
        phase: Phase::Planning,
        base_days: 7,
        tasks: &[
            "Migration strategy documentation",
            "Resource allocation",
            "Schedule creation",
            "Risk mitigation planning",
        ],
        deliverables: &[
            "Detailed migration plan",
            "Resource allocation plan",
            "Risk mitigation plan",
        ],
        validation: &[
            "Plan approved by stakeholders",
            "Resources confirmed",
            "Risks documented and assessed",
        ],
    },
    PhaseTemplate {
        phase: Phase::Preparation,
        base_days: 10,
        tasks: &[
            "Target environment setup",
            "Migration tools installation",
            "Backup verification",
            "Test migration run",
        ],
        deliverables: &[
            "Environment readiness report",
            "Backup verification report",
            "Test migration results",
        ],
        validation: &[
            "Target environment ready",
            "Backups verified",
            "Test migration successful",
        ],
    },
    PhaseTemplate {
        phase: Phase::Migration,
        base_days: 5,
        tasks: &[
            "Data migration",
            "Application migration",
            "Configuration migration",
            "Initial testing",
        ],
        deliverables: &["Migration execution report", "Initial test results"],
        validation: &["All components migrated", "Initial tests passed"],
    },
    PhaseTemplate {
        phase: Phase::Validation,
        base_days: 7,
        tasks: &[
            "Comprehensive testing",
            "Performance validation",
            "Security validation",
            "User acceptance testing",
        ],
        deliverables: &[
            "Test results report",
            "Performance validation report",
            "Security validation report",
            "UAT sign-off",
        ],
        validation: &[
            "All tests passed",
            "Performance metrics met",
            "Security requirements met",
            "User acceptance received",
        ],
    },
    PhaseTemplate {
        phase: Phase::Cutover,
        base_days: 3,
        tasks: &[
            "DNS cutover",
            "Final data sync",
            "Go-live verification",
            "Post-migration monitoring",
        ],
        deliverables: &["Cutover checklist", "Go-live report"],
        validation: &[
            "Cutover successful",
            "System operational",
            "No critical issues",
        ],
    },
];

static REPLATFORM_TEMPLATE: [PhaseTemplate; 6] = [
    PhaseTemplate {
        phase: Phase::Assessment,
        base_days: 7,
        tasks: &[
            "Application and middleware inventory",
            "Managed service mapping",
            "Platform compatibility analysis",
            "Performance baseline creation",
        ],
        deliverables: &[
            "Platform compatibility report",
            "Managed service mapping",
            "Performance baseline document",
        ],
        validation: &[
            "Target platform services selected",
            "Incompatible components identified",
            "Baseline metrics established",
        ],
    },
    PhaseTemplate {
        phase: Phase::Planning,
        base_days: 10,
        tasks: &[
            "Target platform design",
            "Configuration translation planning",
            "Resource allocation",
            "Schedule creation",
        ],
        deliverables: &[
            "Target platform design document",
            "Configuration mapping sheet",
            "Detailed migration plan",
        ],
        validation: &[
            "Design approved by architecture review",
            "Configuration mapping complete",
            "Resources confirmed",
        ],
    },
    PhaseTemplate {
        phase: Phase::Preparation,
        base_days: 14,
        tasks: &[
            "Managed service provisioning",
            "Configuration translation",
            "Runtime and middleware upgrades",
            "Test deployment on target platform",
        ],
        deliverables: &[
            "Provisioned platform services",
            "Translated configuration set",
            "Test deployment results",
        ],
        validation: &[
            "Platform services reachable",
            "Translated configuration validated",
            "Test deployment successful",
        ],
    },
    PhaseTemplate {
        phase: Phase::Migration,
        base_days: 10,
        tasks: &[
            "Data migration to managed services",
            "Application deployment on target platform",
            "Configuration cutover",
            "Integration testing",
        ],
        deliverables: &[
            "Migration execution report",
            "Integration test results",
        ],
        validation: &[
            "All components running on target platform",
            "Integration tests passed",
        ],
    },
    PhaseTemplate {
        phase: Phase::Validation,
        base_days: 10,
        tasks: &[
            "Functional regression testing",
            "Platform performance tuning",
            "Security and compliance validation",
            "User acceptance testing",
        ],
        deliverables: &[
            "Regression test report",
            "Performance tuning report",
            "Compliance validation report",
            "UAT sign-off",
        ],
        validation: &[
            "Regression suite passed",
            "Performance meets or exceeds baseline",
            "Compliance controls verified",
            "User acceptance received",
        ],
    },
    PhaseTemplate {
        phase: Phase::Cutover,
        base_days: 3,
        tasks: &[
            "Traffic switch to target platform",
            "Final data sync",
            "Source decommission planning",
            "Post-migration monitoring",
        ],
        deliverables: &["Cutover checklist", "Go-live report", "Decommission plan"],
        validation: &[
            "Cutover successful",
            "Platform alarms healthy",
            "No critical issues",
        ],
    },
];

static REFACTOR_TEMPLATE: [PhaseTemplate; 6] = [
    PhaseTemplate {
        phase: Phase::Assessment,
        base_days: 10,
        tasks: &[
            "Codebase and architecture review",
            "Domain and service boundary analysis",
            "Technical debt inventory",
            "Performance baseline creation",
        ],
        deliverables: &[
            "Architecture assessment report",
            "Service boundary proposal",
            "Technical debt register",
        ],
        validation: &[
            "Current architecture documented",
            "Candidate service boundaries agreed",
            "Baseline metrics established",
        ],
    },
    PhaseTemplate {
        phase: Phase::Planning,
        base_days: 14,
        tasks: &[
            "Target architecture design",
            "Incremental delivery roadmap",
            "Team and skills allocation",
            "Risk mitigation planning",
        ],
        deliverables: &[
            "Target architecture document",
            "Incremental delivery plan",
            "Risk mitigation plan",
        ],
        validation: &[
            "Architecture approved by review board",
            "Delivery increments sized",
            "Risks documented and assessed",
        ],
    },
    PhaseTemplate {
        phase: Phase::Preparation,
        base_days: 21,
        tasks: &[
            "CI/CD pipeline setup",
            "Cloud-native infrastructure as code",
            "Observability stack setup",
            "Automated test harness creation",
        ],
        deliverables: &[
            "Delivery pipeline",
            "Infrastructure code repository",
            "Test automation suite",
        ],
        validation: &[
            "Pipeline deploys to all environments",
            "Infrastructure reproducible from code",
            "Test harness runs in CI",
        ],
    },
    PhaseTemplate {
        phase: Phase::Migration,
        base_days: 30,
        tasks: &[
            "Service extraction and code refactoring",
            "Data model migration",
            "API contract implementation",
            "Incremental releases behind feature flags",
        ],
        deliverables: &[
            "Refactored services",
            "Migrated data stores",
            "Release notes per increment",
        ],
        validation: &[
            "Each increment passes automated tests",
            "API contracts verified",
        ],
    },
    PhaseTemplate {
        phase: Phase::Validation,
        base_days: 14,
        tasks: &[
            "End-to-end testing",
            "Load and resilience testing",
            "Security review",
            "User acceptance testing",
        ],
        deliverables: &[
            "End-to-end test report",
            "Load test report",
            "Security review report",
            "UAT sign-off",
        ],
        validation: &[
            "End-to-end scenarios passed",
            "Service level objectives met under load",
            "Security findings resolved",
            "User acceptance received",
        ],
    },
    PhaseTemplate {
        phase: Phase::Cutover,
        base_days: 5,
        tasks: &[
            "Progressive traffic shifting",
            "Legacy data reconciliation",
            "Legacy system retirement",
            "Post-migration monitoring",
        ],
        deliverables: &[
            "Traffic shift log",
            "Go-live report",
            "Legacy retirement record",
        ],
        validation: &[
            "All traffic served by new services",
            "Data reconciled",
            "No critical issues",
        ],
    },
];

impl Strategy {
    /// Phase template for this strategy, in execution order
    pub fn phase_template(self) -> &'static [PhaseTemplate] {
        match self {
            Strategy::Rehost => &REHOST_TEMPLATE,
            Strategy::Replatform => &REPLATFORM_TEMPLATE,
            Strategy::Refactor => &REFACTOR_TEMPLATE,
        }
    }

    /// Extra risks this strategy adds on top of a phase's baseline
    pub fn phase_risks(self, phase: Phase) -> &'static [PhaseRisk] {
        match (self, phase) {
            (Strategy::Replatform, Phase::Assessment) => &[PhaseRisk {
                kind: "Platform Compatibility",
                description: "Application compatibility with new platform",
                severity: Level::High,
                mitigation: "Detailed compatibility assessment and testing",
            }],
            (Strategy::Replatform, Phase::Migration) => &[PhaseRisk {
                kind: "Configuration Translation",
                description: "Error in platform-specific configuration translation",
                severity: Level::Medium,
                mitigation: "Automated configuration validation tools",
            }],
            (Strategy::Refactor, Phase::Assessment) => &[PhaseRisk {
                kind: "Architecture Changes",
                description: "Incomplete understanding of required architectural changes",
                severity: Level::High,
                mitigation: "Architecture review board validation",
            }],
            (Strategy::Refactor, Phase::Migration) => &[PhaseRisk {
                kind: "Code Refactoring",
                description: "Unexpected code dependencies or complexity",
                severity: Level::High,
                mitigation: "Incremental refactoring approach with testing",
            }],
            _ => &[],
        }
    }

    /// Extra mitigation entries this strategy adds on top of a phase's baseline
    pub fn phase_mitigations(self, phase: Phase) -> &'static [PhaseMitigation] {
        match (self, phase) {
            (Strategy::Replatform, Phase::Assessment) => &[PhaseMitigation {
                category: "Platform Validation",
                actions: &[
                    "Prototype critical components on the target platform",
                    "Review managed service limits and quotas",
                ],
                verification: "Compatibility prototype accepted",
            }],
            (Strategy::Replatform, Phase::Migration) => &[PhaseMitigation {
                category: "Configuration Management",
                actions: &[
                    "Generate target configuration from a single source of truth",
                    "Diff translated configuration against the source",
                ],
                verification: "Automated configuration validation passes",
            }],
            (Strategy::Refactor, Phase::Assessment) => &[PhaseMitigation {
                category: "Architecture Governance",
                actions: &[
                    "Hold architecture review board sessions",
                    "Record architecture decisions",
                ],
                verification: "Architecture review board approval",
            }],
            (Strategy::Refactor, Phase::Migration) => &[PhaseMitigation {
                category: "Incremental Delivery",
                actions: &[
                    "Refactor in small increments behind feature flags",
                    "Gate each increment on automated tests",
                ],
                verification: "Every increment released with passing tests",
            }],
            _ => &[],
        }
    }
}

/// Fixed response plan for one server risk category
#[derive(Debug, Clone, Copy)]
pub struct CategoryMitigation {
    pub strategies: &'static [&'static str],
    pub contingency: &'static [&'static str],
}

pub const MITIGATION_OWNER: &str = "Migration Team";

impl RiskCategory {
    pub fn mitigation(self) -> CategoryMitigation {
        match self {
            RiskCategory::Technical => CategoryMitigation {
                strategies: &[
                    "Conduct pre-migration performance optimization",
                    "Schedule migration during low-utilization periods",
                    "Provision additional temporary resources",
                ],
                contingency: &[
                    "Rollback plan with defined triggers",
                    "Alternative migration approach identification",
                ],
            },
            RiskCategory::Dependencies => CategoryMitigation {
                strategies: &[
                    "Detailed dependency mapping and validation",
                    "Phased migration approach",
                    "Dedicated dependency testing phase",
                ],
                contingency: &[
                    "Manual dependency handling procedures",
                    "Temporary maintenance of hybrid connectivity",
                ],
            },
            RiskCategory::Data => CategoryMitigation {
                strategies: &[
                    "Pre-migration data cleanup",
                    "Incremental data transfer approach",
                    "Bandwidth optimization techniques",
                ],
                contingency: &[
                    "Alternative data transfer methods",
                    "Emergency storage provisioning plan",
                ],
            },
            RiskCategory::Application => CategoryMitigation {
                strategies: &[
                    "Inventory application versions with owners",
                    "Validate vendor support on the target platform",
                    "Run compatibility tests in a staging environment",
                ],
                contingency: &[
                    "Keep the source server available for rollback",
                    "Engage vendor support for remediation",
                ],
            },
        }
    }
}
