//! Static fallback content, one set per LLM slot and review aspect.
//!
//! Served whenever a slot has no credential or a call fails, keeping
//! every endpoint well-formed at the cost of topic-specific accuracy.
//! The primary and secondary variants differ so the merge step still has
//! two genuinely distinct lists to reconcile.

use crate::types::{DeepDiveEntry, DeepDiveItemReview, DeepDivesReview, DetailedDiagramReview, DiagramSuggestion, FlowReview, LineFeedback, RequirementLists};

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn requirements_primary() -> RequirementLists {
    RequirementLists {
        functional: list(&[
            "User authentication and authorization",
            "Core feature implementation",
            "Data storage and retrieval",
            "API endpoints",
            "Error handling",
        ]),
        non_functional: list(&[
            "Scalability to handle 1M+ users",
            "99.9% uptime",
            "Response time < 200ms",
            "Data consistency",
            "Security and encryption",
        ]),
    }
}

pub fn requirements_secondary() -> RequirementLists {
    RequirementLists {
        functional: list(&[
            "User management",
            "Core business logic",
            "Data persistence",
            "RESTful API",
            "Input validation",
        ]),
        non_functional: list(&[
            "Horizontal scalability",
            "High availability",
            "Low latency",
            "ACID compliance",
            "End-to-end encryption",
        ]),
    }
}

pub fn apis_primary() -> Vec<String> {
    list(&[
        "POST /shorten – create short URL from long URL",
        "GET /:id – resolve short URL and redirect to long URL",
        "GET /analytics/:id – get click statistics for a short URL",
        "POST /users – register user",
        "GET /users/:id/urls – list short URLs created by user",
    ])
}

pub fn apis_secondary() -> Vec<String> {
    list(&[
        "POST /api/shorten – create and store short link",
        "GET /s/:shortCode – redirect to original URL",
        "GET /api/stats/:shortCode – retrieve analytics",
        "PUT /api/shorten/:id – update or delete short link",
        "GET /api/health – health check endpoint",
    ])
}

pub fn diagram_primary() -> DiagramSuggestion {
    DiagramSuggestion {
        elements: list(&["Load Balancer", "API Server", "Database", "Cache", "Client"]),
        diagram_source: "flowchart TB\n  A[Client] --> B[Load Balancer]\n  B --> C[API Server]\n  C --> D[Database]\n  C --> E[Cache]"
            .to_string(),
    }
}

pub fn diagram_secondary() -> Vec<String> {
    list(&[
        "Web Server",
        "Application Server",
        "Database",
        "Message Queue",
        "CDN",
    ])
}

pub fn estimation_primary() -> Vec<String> {
    list(&[
        "DAU / MAU or user scale",
        "Queries per second (QPS)",
        "Storage size",
        "Bandwidth",
        "Read/write ratio",
    ])
}

pub fn estimation_secondary() -> Vec<String> {
    list(&[
        "Daily active users",
        "Requests per second",
        "Data storage requirements",
        "Network bandwidth",
        "Cache hit rate",
    ])
}

pub fn data_model_primary() -> Vec<String> {
    list(&[
        "Users (id, email, createdAt)",
        "ShortUrl (shortCode, longUrl, userId, createdAt)",
        "Clicks (shortCode, timestamp, userAgent)",
        "Index on ShortUrl.shortCode",
        "Index on ShortUrl.userId",
    ])
}

pub fn data_model_secondary() -> Vec<String> {
    list(&[
        "Users (id, email, createdAt)",
        "UrlMapping (shortCode, longUrl, userId, createdAt)",
        "Analytics (shortCode, timestamp)",
        "Index on shortCode",
    ])
}

pub fn calculation_feedback(user_lines: &[String]) -> Vec<LineFeedback> {
    user_lines
        .iter()
        .map(|line| LineFeedback {
            user_line: line.trim().to_string(),
            reasonable: true,
            comment: "Stub: enable OpenAI API key for calculation review.".to_string(),
        })
        .collect()
}

pub fn data_model_feedback(user_lines: &[String]) -> Vec<LineFeedback> {
    user_lines
        .iter()
        .map(|line| LineFeedback {
            user_line: line.trim().to_string(),
            reasonable: true,
            comment: "Stub: enable OpenAI API key for data model review.".to_string(),
        })
        .collect()
}

pub fn flow_review() -> FlowReview {
    FlowReview {
        correct: true,
        feedback: "Stub: enable OpenAI API key for flow review.".to_string(),
        improvements: String::new(),
        degraded: true,
    }
}

pub fn deep_dives_review(entries: &[DeepDiveEntry]) -> DeepDivesReview {
    DeepDivesReview {
        items: entries
            .iter()
            .map(|entry| DeepDiveItemReview {
                topic: entry.topic.trim().to_string(),
                suggested_summary: String::new(),
                feedback: "Stub: enable OpenAI API key for deep dive review.".to_string(),
            })
            .collect(),
        suggested_missing_topics: Vec::new(),
        degraded: true,
    }
}

pub fn detailed_diagram_review() -> DetailedDiagramReview {
    DetailedDiagramReview {
        feedback: "Stub: enable OpenAI API key for detailed diagram review.".to_string(),
        improvements: String::new(),
        suggested_diagram: "client -> lb: HTTPS\nlb -> api\napi -> cache\napi -> db".to_string(),
        suggested_diagram_png: String::new(),
        degraded: true,
    }
}
