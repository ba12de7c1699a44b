use serde::Serialize;
use std::collections::BTreeMap;

/// Prompt template offered by the UI. `prompt` holds one `{placeholder}`
/// that the UI fills in from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub title: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,
    pub example: &'static str,
}

pub const TEMPLATES: [(&str, Template); 4] = [
    (
        "webscraping",
        Template {
            title: "Web Scraping",
            description: "Extract data from websites",
            prompt: "Write a Python script that extracts data from the site: {url}",
            example: "https://example.com",
        },
    ),
    (
        "api",
        Template {
            title: "Build an API",
            description: "Develop a REST API",
            prompt: "Build a REST API with FastAPI to {purpose}",
            example: "manage users",
        },
    ),
    (
        "automation",
        Template {
            title: "Automation",
            description: "Automate repetitive tasks",
            prompt: "Write an automation script to {task}",
            example: "send emails automatically",
        },
    ),
    (
        "dataanalysis",
        Template {
            title: "Data Analysis",
            description: "Analyze and process data",
            prompt: "Analyze and process the data from {source}",
            example: "a CSV file of sales",
        },
    ),
];

pub fn templates() -> BTreeMap<&'static str, Template> {
    TEMPLATES.into_iter().collect()
}
