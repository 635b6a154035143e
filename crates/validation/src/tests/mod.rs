// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]


use serde_json::{Value, json};

/// A complete onboarding questionnaire that passes validation.
pub fn valid_onboarding() -> Value {
    json!({
        "target_job_titles": ["Software Engineer", "Backend Developer"],
        "target_industries": ["Technology"],
        "target_locations": ["Remote", "Austin, TX"],
        "target_salary_range": "$120,000 - $150,000",
        "years_of_experience": 6,
        "key_technical_skills": ["Rust", "PostgreSQL", "Kubernetes"],
        "career_goals_short_term": "Land a senior backend role at a product company.",
        "biggest_career_challenges": ["Getting past resume screens"],
        "support_areas_needed": ["Resume review", "Interview prep"]
    })
}

/// A staff-submitted application body that passes validation.
pub fn valid_create_application() -> Value {
    json!({
        "client_id": "6f1c2a8e-3d44-4d7b-9a51-0c2f7e9b1a23",
        "company_name": "Acme Corp",
        "job_title": "Software Engineer",
        "job_url": "https://jobs.acme.example/123"
    })
}
