//! Seed organisation loaded when the server starts with `SEED_DATA=true`
//!
//! Fixed ids make the seed easy to reference from clients and tests.

use orgchart_core::entities::{Department, Employee, NewDepartment, NewEmployee};
use orgchart_core::value_objects::EmployeeType;

pub const CEO_ID: &str = "emp-vadim";
pub const CHIEF_STRATEGY_ID: &str = "emp-jarvis";

/// Departments with their heads already assigned
pub fn departments() -> Vec<Department> {
    [
        ("dept-research", "Research", "🔬", "#8b5cf6", "emp-atlas"),
        ("dept-development", "Development", "💻", "#3b82f6", "emp-clawd"),
        ("dept-content", "Content", "📝", "#10b981", "emp-scribe"),
        ("dept-creative", "Creative", "🎨", "#f59e0b", "emp-pixel"),
        ("dept-product", "Product", "📦", "#ef4444", "emp-clip"),
        ("dept-sales", "Sales", "💰", "#ec4899", "emp-sage"),
    ]
    .into_iter()
    .map(|(id, name, icon, color, head)| {
        Department::new(
            id.to_string(),
            NewDepartment {
                name: name.to_string(),
                icon: Some(icon.to_string()),
                color: Some(color.to_string()),
                parent_department_id: None,
                head_id: Some(head.to_string()),
            },
        )
    })
    .collect()
}

struct Seed {
    id: &'static str,
    name: &'static str,
    initials: &'static str,
    title: &'static str,
    kind: EmployeeType,
    department: Option<&'static str>,
    manager: Option<&'static str>,
    matrix: Option<&'static str>,
    color: &'static str,
    skills: &'static [&'static str],
    council_role: Option<&'static str>,
    description: &'static str,
}

impl Seed {
    const fn ai(
        id: &'static str,
        name: &'static str,
        initials: &'static str,
        title: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            initials,
            title,
            kind: EmployeeType::Ai,
            department: None,
            manager: Some(CHIEF_STRATEGY_ID),
            matrix: None,
            color: "#6366f1",
            skills: &[],
            council_role: None,
            description: title,
        }
    }

    fn into_employee(self) -> Employee {
        Employee::new(
            self.id.to_string(),
            NewEmployee {
                name: self.name.to_string(),
                initials: Some(self.initials.to_string()),
                title: self.title.to_string(),
                employee_type: Some(self.kind),
                department_id: self.department.map(str::to_string),
                manager_id: self.manager.map(str::to_string),
                matrix_user_id: self.matrix.map(str::to_string),
                avatar_color: Some(self.color.to_string()),
                skills: self.skills.iter().map(|s| (*s).to_string()).collect(),
                is_council_member: self.council_role.is_some(),
                council_role: self.council_role.map(str::to_string),
                description: Some(self.description.to_string()),
            },
        )
    }
}

/// The CEO, council, departmental staff, and two unassigned executives
pub fn employees() -> Vec<Employee> {
    let seeds = [
        Seed {
            kind: EmployeeType::Human,
            manager: None,
            skills: &["Leadership", "Vision", "Strategy"],
            description: "Founder & CEO",
            ..Seed::ai(CEO_ID, "John Doe", "JD", "CEO")
        },
        Seed {
            manager: Some(CEO_ID),
            matrix: Some("@jarvis:localhost"),
            color: "#f97316",
            skills: &["Strategic Planning", "Task Orchestration"],
            description: "AI Chief Strategy Officer",
            ..Seed::ai(CHIEF_STRATEGY_ID, "JARVIS", "JA", "Chief Strategy Officer")
        },
        Seed {
            manager: Some(CEO_ID),
            color: "#10b981",
            skills: &["Growth Strategy", "Market Expansion", "Scaling"],
            council_role: Some("Growth Advisor"),
            description: "AI Growth Council Member",
            ..Seed::ai("emp-growth", "GROWTH", "GR", "Council Advisor")
        },
        Seed {
            manager: Some(CEO_ID),
            color: "#3b82f6",
            skills: &["Customer Retention", "Churn Analysis", "Loyalty Programs"],
            council_role: Some("Retention Advisor"),
            description: "AI Retention Council Member",
            ..Seed::ai("emp-retention", "RETENTION", "RE", "Council Advisor")
        },
        Seed {
            manager: Some(CEO_ID),
            color: "#ef4444",
            skills: &["Critical Analysis", "Risk Assessment", "Devil's Advocate"],
            council_role: Some("Skeptic Advisor"),
            description: "AI Skeptic Council Member",
            ..Seed::ai("emp-skeptic", "SKEPTIC", "SK", "Council Advisor")
        },
        Seed {
            manager: Some(CEO_ID),
            color: "#eab308",
            skills: &["Business Consulting", "Data Analysis"],
            description: "On-Demand McKinsey-Level Strategy",
            ..Seed::ai("emp-oracle", "ORACLE", "OR", "Consultant")
        },
        Seed {
            department: Some("dept-research"),
            matrix: Some("@atlas:localhost"),
            color: "#8b5cf6",
            skills: &["Deep Research", "Data Mining", "Report Generation"],
            ..Seed::ai("emp-atlas", "ATLAS", "AT", "Senior Research Analyst")
        },
        Seed {
            department: Some("dept-research"),
            color: "#ec4899",
            skills: &["Trend Analysis", "Viral Content Detection", "Social Listening"],
            ..Seed::ai("emp-trendy", "TRENDY", "TR", "Viral Scout")
        },
        Seed {
            department: Some("dept-development"),
            matrix: Some("@clawd:localhost"),
            color: "#14b8a6",
            skills: &["Full-Stack Development", "Code Review", "Architecture"],
            ..Seed::ai("emp-clawd", "CLAWD", "CL", "Senior Developer")
        },
        Seed {
            department: Some("dept-development"),
            color: "#f97316",
            skills: &["Quality Assurance", "Automated Testing", "Bug Detection"],
            ..Seed::ai("emp-sentinel", "SENTINEL", "SE", "QA Monitor")
        },
        Seed {
            department: Some("dept-content"),
            color: "#10b981",
            skills: &["Content Strategy", "Copywriting", "Editorial Planning"],
            ..Seed::ai("emp-scribe", "SCRIBE", "SC", "Content Director")
        },
        Seed {
            department: Some("dept-creative"),
            color: "#eab308",
            skills: &["UI/UX Design", "Graphic Design", "Brand Identity"],
            ..Seed::ai("emp-pixel", "PIXEL", "PX", "Lead Designer")
        },
        Seed {
            department: Some("dept-creative"),
            skills: &["Video Editing", "Production Planning", "Storytelling"],
            ..Seed::ai("emp-nova", "NOVA", "NO", "Video Production Lead")
        },
        Seed {
            department: Some("dept-creative"),
            color: "#ec4899",
            skills: &["Motion Graphics", "Animation", "Visual Effects"],
            ..Seed::ai("emp-vibe", "VIBE", "VI", "Senior Motion Designer")
        },
        Seed {
            department: Some("dept-product"),
            color: "#ef4444",
            skills: &["Content Clipping", "Highlight Detection", "Auto-editing"],
            ..Seed::ai("emp-clip", "CLIP", "CP", "Clipping Agent")
        },
        Seed {
            department: Some("dept-sales"),
            color: "#14b8a6",
            skills: &["Sales Strategy", "Pipeline Management", "Forecasting"],
            ..Seed::ai("emp-sage", "SAGE", "SA", "Sales Manager")
        },
        Seed {
            department: Some("dept-sales"),
            manager: Some("emp-sage"),
            color: "#f97316",
            skills: &["Deal Closing", "Negotiation", "Client Relations"],
            ..Seed::ai("emp-closer", "CLOSER", "CO", "Account Executive")
        },
    ];

    seeds.into_iter().map(Seed::into_employee).collect()
}
