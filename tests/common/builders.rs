use gherkin_report::model::report_model::{Feature, Report, Run, Scenario, Status, Step, Tag};

// ============================================================================
// Helper builders
// ============================================================================

pub fn step(keyword: &str, text: &str, status: Status) -> Step {
    Step {
        keyword: keyword.to_string(),
        text: text.to_string(),
        status,
        elapsed_seconds: 0.1,
        error_text: None,
        log_text: None,
    }
}

pub fn step_with_detail(
    keyword: &str,
    text: &str,
    status: Status,
    error: Option<&str>,
    log: Option<&str>,
) -> Step {
    Step {
        error_text: error.map(str::to_string),
        log_text: log.map(str::to_string),
        ..step(keyword, text, status)
    }
}

pub fn scenario(name: &str, status: Status) -> Scenario {
    Scenario {
        name: name.to_string(),
        description: None,
        tags: vec![],
        elapsed_seconds: 1.0,
        status,
        steps: vec![],
        error_text: None,
        log_text: None,
        start_time: None,
        end_time: None,
    }
}

pub fn scenario_with_steps(name: &str, status: Status, steps: Vec<Step>) -> Scenario {
    Scenario {
        steps,
        ..scenario(name, status)
    }
}

/// A feature whose scenarios have the given statuses, named `s0`, `s1`, …
pub fn feature(name: &str, statuses: &[Status]) -> Feature {
    Feature {
        name: name.to_string(),
        description: None,
        scenarios: statuses
            .iter()
            .enumerate()
            .map(|(i, st)| scenario(&format!("s{}", i), *st))
            .collect(),
    }
}

pub fn sample_run() -> Run {
    Run {
        elapsed_seconds: 12.3456,
        cpu_count: 8,
        start_timestamp: "2024-05-01 10:00:00".to_string(),
        end_timestamp: "2024-05-01 10:00:12".to_string(),
        success: Some(false),
        pid: Some(4242),
    }
}

/// Four features, one per roll-up status:
/// Login (failed), Search (success), Payments (skipped), Profile (incomplete).
pub fn sample_report() -> Report {
    let login = Feature {
        name: "Login".to_string(),
        description: Some("Users sign in with a password".to_string()),
        scenarios: vec![
            Scenario {
                tags: vec![
                    Tag { id: "t1".into(), name: "@smoke".into() },
                    Tag { id: "t2".into(), name: "@auth".into() },
                ],
                ..scenario_with_steps(
                    "Valid password",
                    Status::Success,
                    vec![
                        step("Given", "I am on the login page", Status::Success),
                        step_with_detail(
                            "When",
                            "I enter valid credentials",
                            Status::Success,
                            None,
                            Some("POST /login 200"),
                        ),
                        step("Then", "I see the dashboard", Status::Success),
                    ],
                )
            },
            Scenario {
                error_text: Some("expected 'Invalid password' banner".to_string()),
                ..scenario_with_steps(
                    "Wrong password",
                    Status::Failed,
                    vec![
                        step("Given", "I am on the login page", Status::Success),
                        step("When", "I enter a wrong password", Status::Success),
                        Step {
                            elapsed_seconds: 6.25,
                            ..step_with_detail(
                                "Then",
                                "I see an error",
                                Status::Failed,
                                Some("AssertionError: banner <missing>"),
                                Some("GET /login 200"),
                            )
                        },
                    ],
                )
            },
        ],
    };

    let search = Feature {
        name: "Search".to_string(),
        description: None,
        scenarios: vec![
            scenario_with_steps(
                "By keyword",
                Status::Success,
                vec![step("When", "I search for \"rust\"", Status::Success)],
            ),
            scenario_with_steps(
                "By tag",
                Status::Success,
                vec![step("When", "I search for tag", Status::Success)],
            ),
        ],
    };

    let payments = Feature {
        name: "Payments".to_string(),
        description: None,
        scenarios: vec![
            scenario_with_steps(
                "Card",
                Status::Skipped,
                vec![step("Given", "a card", Status::Skipped)],
            ),
            scenario("Invoice", Status::Skipped),
        ],
    };

    let profile = feature("Profile", &[Status::Success, Status::Skipped]);

    Report::new(Some(sample_run()), vec![login, search, payments, profile]).unwrap()
}
