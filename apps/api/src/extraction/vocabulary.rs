//! Fixed vocabularies used by segmentation, skill tagging and the title boost.
//!
//! Everything here is plain data. `Vocabulary::default()` wires up the curated
//! lists; tests and deployments can build a smaller or larger `Vocabulary` and
//! inject it into the `Segmenter` / `EmployabilityScorer` at construction.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Canonical resume sections that header tokens are bucketed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    Experience,
    Education,
    Skills,
    Summary,
    Other,
}

impl Section {
    /// Separator used when a section header occurs more than once.
    pub fn joiner(self) -> &'static str {
        match self {
            Section::Skills => ", ",
            _ => "\n",
        }
    }
}

/// A header token as it appears in a resume, and the section it opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderToken {
    pub label: String,
    pub section: Section,
}

impl HeaderToken {
    pub fn new(label: impl Into<String>, section: Section) -> Self {
        Self {
            label: label.into(),
            section,
        }
    }
}

/// Skill labels, section headers and role keywords, injected as one value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    pub skills: Vec<String>,
    pub headers: Vec<HeaderToken>,
    pub role_keywords: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            skills: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
            headers: DEFAULT_HEADERS
                .iter()
                .map(|(label, section)| HeaderToken::new(*label, *section))
                .collect(),
            role_keywords: DEFAULT_ROLE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Vocabulary {
    /// Replaces the skill list with one label per non-blank line of `path`.
    pub fn with_skills_file(mut self, path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skill vocabulary '{}'", path.display()))?;
        self.skills = parse_skill_lines(&contents);
        if self.skills.is_empty() {
            anyhow::bail!("Skill vocabulary '{}' is empty", path.display());
        }
        Ok(self)
    }
}

fn parse_skill_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Header tokens in match priority order.
pub const DEFAULT_HEADERS: &[(&str, Section)] = &[
    ("Experience", Section::Experience),
    ("Work Experience", Section::Experience),
    ("Professional Experience", Section::Experience),
    ("Education", Section::Education),
    ("Academic", Section::Education),
    ("Skills", Section::Skills),
    ("Technical Skills", Section::Skills),
    ("Certifications", Section::Other),
    ("Projects", Section::Other),
    ("Summary", Section::Summary),
    ("Objective", Section::Summary),
];

pub const DEFAULT_ROLE_KEYWORDS: &[&str] = &[
    "developer",
    "engineer",
    "manager",
    "analyst",
    "designer",
    "scientist",
    "administrator",
    "consultant",
];

/// Curated skill dictionary. Some labels appear under more than one category;
/// the extractor collapses repeats.
pub const DEFAULT_SKILLS: &[&str] = &[
    // Programming languages
    "Python", "Java", "JavaScript", "C++", "C#", "PHP", "Ruby", "Swift", "Kotlin", "Go", "Rust",
    "TypeScript", "HTML", "CSS", "SQL", "R", "MATLAB", "Perl", "Scala", "Dart", "Haskell", "Lua",
    "Assembly", "Bash", "Shell Scripting", "PowerShell", "Objective-C", "Groovy", "Elixir",
    "Clojure", "Fortran", "COBOL", "F#", "Julia", "Racket", "Erlang", "Visual Basic", "VBA", "SAS",
    "Stata", "SPSS", "APL", "Prolog", "Lisp", "Scheme", "Smalltalk", "Ada", "Delphi", "Pascal",
    // Web development
    "React", "Angular", "Vue", "Node.js", "Express.js", "Django", "Flask", "Spring", "Laravel",
    "Rails", "Bootstrap", "jQuery", "Sass", "Less", "Tailwind CSS", "Material-UI", "Ant Design",
    "Webpack", "Babel", "Gulp", "Grunt", "Next.js", "Nuxt.js", "Gatsby", "Nest.js", "FastAPI",
    "ASP.NET", "WordPress", "Drupal", "Joomla", "Magento", "Shopify", "Webflow", "GraphQL",
    "REST API", "SOAP", "WebSockets", "PWA", "Web Components", "Web Assembly", "Three.js", "D3.js",
    // Mobile
    "React Native", "Flutter", "Ionic", "Xamarin", "Cordova", "PhoneGap", "Android Studio",
    "Xcode", "SwiftUI", "Jetpack Compose", "Appium", "Fastlane",
    // Databases
    "MySQL", "PostgreSQL", "MongoDB", "Redis", "Oracle", "SQL Server", "SQLite", "MariaDB",
    "Cassandra", "Couchbase", "DynamoDB", "Firebase", "Realm", "Neo4j", "ArangoDB", "CouchDB",
    "HBase", "BigQuery", "Snowflake", "Redshift", "Databricks", "Elasticsearch", "Solr", "SQL",
    "NoSQL", "ETL", "Data Warehousing", "Data Modeling", "Database Design",
    // Cloud & DevOps
    "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Jenkins", "Git", "GitHub", "GitLab",
    "Bitbucket", "Ansible", "Terraform", "Puppet", "Chef", "Vagrant", "Prometheus", "Grafana",
    "Splunk", "New Relic", "Datadog", "CircleCI", "Travis CI", "GitHub Actions", "GitLab CI",
    "Azure DevOps", "Serverless", "Lambda", "EC2", "S3", "RDS", "VPC", "IAM", "CloudFormation",
    "CloudFront", "Route53", "Load Balancing", "Auto Scaling", "Containerization", "Microservices",
    "API Gateway", "Cloud Security", "Identity Management", "Monitoring", "Logging",
    "Performance Optimization",
    // Data science & ML
    "Pandas", "NumPy", "TensorFlow", "PyTorch", "Scikit-learn", "Keras", "OpenCV", "NLTK", "spaCy",
    "Hugging Face", "Transformers", "LangChain", "OpenAI", "LLM", "Computer Vision",
    "Natural Language Processing", "Deep Learning", "Neural Networks", "CNN", "RNN", "LSTM", "GAN",
    "Reinforcement Learning", "Data Analysis", "Data Visualization", "Tableau", "Power BI",
    "Matplotlib", "Seaborn", "Plotly", "Jupyter", "Colab", "RStudio", "Apache Spark", "Hadoop",
    "Hive", "Pig", "Kafka", "Airflow", "MLOps", "Model Deployment", "Feature Engineering",
    "Statistical Analysis", "Hypothesis Testing", "Regression", "Classification", "Clustering",
    "Recommendation Systems", "Time Series Analysis",
    // Tools & platforms
    "Linux", "Unix", "Windows", "macOS", "Vim", "Emacs", "VSCode", "IntelliJ", "Eclipse", "PyCharm",
    "Android Development", "iOS Development", "Cross-Platform Development", "Desktop Applications",
    "Game Development", "Unity", "Unreal Engine", "Blender", "Maya", "3D Modeling",
    "VR/AR Development", "Embedded Systems", "IoT", "Firmware", "Device Drivers", "Robotics",
    "Automation", "Scripting",
    // Security
    "Network Security", "Application Security", "Cloud Security", "Information Security",
    "Cybersecurity", "Penetration Testing", "Ethical Hacking", "Vulnerability Assessment",
    "Security Auditing", "Cryptography", "Encryption", "PKI", "SSL/TLS", "Firewalls", "IDS/IPS",
    "SIEM", "SOC", "Incident Response", "Digital Forensics", "Risk Management", "Compliance",
    "GDPR", "HIPAA", "PCI DSS", "NIST", "ISO 27001", "OWASP", "Security Protocols", "Zero Trust",
    "Multi-factor Authentication",
    // Methodologies
    "Agile", "Scrum", "Kanban", "Waterfall", "DevOps", "CI/CD", "Lean", "Six Sigma", "Prince2",
    "PMBOK", "Project Management", "Product Management", "Product Ownership",
    "Backlog Management", "Sprint Planning", "User Stories", "Requirements Gathering",
    "Stakeholder Management", "Risk Management", "Change Management", "Quality Assurance",
    "Testing", "QA", "UAT", "Documentation", "Technical Writing", "Business Analysis",
    "Process Improvement",
    // Business
    "Leadership", "Team Management", "Project Management", "Strategic Planning",
    "Business Strategy", "Product Strategy", "Market Research", "Competitive Analysis",
    "Business Development", "Partnerships", "Sales", "Marketing", "Digital Marketing", "SEO", "SEM",
    "Social Media Marketing", "Content Marketing", "Email Marketing", "Brand Management",
    "Public Relations", "CRM", "Customer Relationship Management", "Customer Service",
    "Client Management", "Account Management", "Negotiation", "Contract Management",
    "Vendor Management", "Supply Chain Management", "Operations Management", "Financial Analysis",
    "Budgeting", "Forecasting", "Financial Modeling", "Data Analysis", "Business Intelligence",
    "KPIs", "Metrics", "Reporting", "Dashboard Creation",
    // Soft skills
    "Communication", "Verbal Communication", "Written Communication", "Presentation Skills",
    "Public Speaking", "Interpersonal Skills", "Teamwork", "Collaboration",
    "Cross-functional Collaboration", "Problem Solving", "Critical Thinking",
    "Analytical Thinking", "Creative Thinking", "Innovation", "Adaptability", "Flexibility",
    "Resilience", "Time Management", "Organization", "Multitasking", "Attention to Detail",
    "Quality Focus", "Results-oriented", "Goal-oriented", "Self-motivated", "Initiative",
    "Proactive", "Decision Making", "Conflict Resolution", "Emotional Intelligence", "Mentoring",
    "Coaching", "Training", "Team Building", "Cultural Awareness", "Diversity and Inclusion",
    // Design
    "UI/UX Design", "User Interface Design", "User Experience Design", "Wireframing",
    "Prototyping", "Figma", "Sketch", "Adobe XD", "InVision", "Photoshop", "Illustrator",
    "InDesign", "After Effects", "Premiere Pro", "Final Cut Pro", "Graphic Design",
    "Visual Design", "Interaction Design", "Human-Centered Design", "Design Thinking",
    "Usability Testing", "Accessibility", "WCAG", "Motion Graphics", "Video Editing", "Animation",
    "Illustration", "Typography", "Color Theory", "Brand Identity", "Logo Design", "Print Design",
    "Packaging Design", "Photography",
    // Industry
    "Healthcare IT", "Health Informatics", "Electronic Health Records", "FinTech", "Blockchain",
    "Cryptocurrency", "Smart Contracts", "Banking Systems", "Insurance Technology", "EdTech",
    "Learning Management Systems", "E-commerce", "Payment Processing",
    "Supply Chain Technology", "Logistics", "Manufacturing Systems", "Automotive Technology",
    "Aerospace Systems", "Telecommunications", "Network Engineering", "Wireless Technologies",
    "Satellite Systems",
    // Spoken languages
    "English", "Spanish", "French", "German", "Chinese", "Japanese", "Korean", "Arabic", "Hindi",
    "Portuguese", "Russian", "Italian", "Dutch", "Swedish", "Norwegian", "Danish", "Finnish",
    "Polish", "Turkish", "Hebrew", "Greek", "Thai", "Vietnamese", "Malay", "Indonesian",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_vocabulary_is_populated() {
        let vocab = Vocabulary::default();
        assert!(vocab.skills.len() > 300);
        assert_eq!(vocab.headers.len(), 11);
        assert_eq!(vocab.role_keywords.len(), 8);
    }

    #[test]
    fn test_certifications_and_projects_bucket_into_other() {
        let vocab = Vocabulary::default();
        for label in ["Certifications", "Projects"] {
            let header = vocab.headers.iter().find(|h| h.label == label).unwrap();
            assert_eq!(header.section, Section::Other);
        }
    }

    #[test]
    fn test_skills_joiner_is_comma() {
        assert_eq!(Section::Skills.joiner(), ", ");
        assert_eq!(Section::Experience.joiner(), "\n");
    }

    #[test]
    fn test_parse_skill_lines_skips_blanks_and_comments() {
        let skills = parse_skill_lines("Rust\n\n# comment\n  Tokio  \n");
        assert_eq!(skills, vec!["Rust".to_string(), "Tokio".to_string()]);
    }

    #[test]
    fn test_with_skills_file_replaces_skill_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Rust\nAxum").unwrap();

        let vocab = Vocabulary::default().with_skills_file(file.path()).unwrap();
        assert_eq!(vocab.skills, vec!["Rust".to_string(), "Axum".to_string()]);
        assert_eq!(vocab.role_keywords.len(), 8);
    }

    #[test]
    fn test_with_skills_file_rejects_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(Vocabulary::default().with_skills_file(file.path()).is_err());
    }
}
