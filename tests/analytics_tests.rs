
use reqwest::StatusCode;
use skill_gap_backend::entities::{learning_resource::ResourceLevel, target::Importance};
use test_utils::*;
use uuid::Uuid;

#[actix_rt::test]
async fn gap_analysis_splits_gaps_and_missing() {
    let app = TestApp::spawn().await;
    let manager = app.seed_employee("Grace", None);
    let employee = app.seed_employee("Ada", Some(manager));
    let target = app.seed_target("Backend Engineer");
    let skill_a = app.require(target, "Rust", 2, Importance::MustHave);
    let skill_b = app.require(target, "SQL", 1, Importance::NiceToHave);
    app.grant_skill(employee, manager, skill_a, 1).await;

    let (status, body) = app
        .get_json(&format!("/analytics/employees/{}/gap?target_id={}", employee, target))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["match_score"], 0.0);
    assert_eq!(body["matches"].as_array().unwrap().len(), 0);
    assert_eq!(body["gaps"][0]["skill_id"], skill_a.to_string());
    assert_eq!(body["gaps"][0]["gap"], 1);
    assert_eq!(body["gaps"][0]["importance"], "must_have");
    assert_eq!(body["missing"][0]["skill_id"], skill_b.to_string());
    assert_eq!(body["missing"][0]["gap"], 1);
    assert_eq!(body["missing"][0]["importance"], "nice_to_have");
}

#[actix_rt::test]
async fn pending_skills_do_not_count_towards_the_score() {
    let app = TestApp::spawn().await;
    let employee = app.seed_employee("Ada", None);
    let target = app.seed_target("Data Platform");
    let skill = app.require(target, "Kafka", 2, Importance::MustHave);
    app.submit_skill(employee, skill, 3).await;

    let (status, body) = app
        .get_json(&format!("/analytics/employees/{}/gap?target_id={}", employee, target))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["missing"][0]["gap"], 2);
    assert_eq!(body["missing"][0]["current_level"], 0);
}

#[actix_rt::test]
async fn full_coverage_scores_one_hundred() {
    let app = TestApp::spawn().await;
    let manager = app.seed_employee("Grace", None);
    let employee = app.seed_employee("Ada", Some(manager));
    let target = app.seed_target("Cloud Migration");
    for (name, level) in [("Terraform", 1), ("AWS", 2)] {
        let skill = app.require(target, name, level, Importance::MustHave);
        app.grant_skill(employee, manager, skill, 3).await;
    }

    let (_, body) = app
        .get_json(&format!("/analytics/employees/{}/gap?target_id={}", employee, target))
        .await;

    assert_eq!(body["match_score"], 100.0);
    assert_eq!(body["matches"].as_array().unwrap().len(), 2);
    assert!(body["gaps"].as_array().unwrap().is_empty());
    assert!(body["missing"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn unknown_target_returns_404() {
    let app = TestApp::spawn().await;
    let employee = app.seed_employee("Ada", None);

    let (status, body) = app
        .get_json(&format!("/analytics/employees/{}/gap?target_id={}", employee, Uuid::new_v4()))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Role or project"));
}

#[actix_rt::test]
async fn missing_target_id_is_a_bad_request() {
    let app = TestApp::spawn().await;
    let employee = app.seed_employee("Ada", None);

    let (status, _) = app.get_json(&format!("/analytics/employees/{}/gap", employee)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn recommendations_rank_must_haves_first() {
    let app = TestApp::spawn().await;
    let manager = app.seed_employee("Grace", None);
    let employee = app.seed_employee("Ada", Some(manager));
    let target = app.seed_target("Backend Engineer");
    let skill_a = app.require(target, "Rust", 2, Importance::MustHave);
    let skill_b = app.require(target, "SQL", 1, Importance::NiceToHave);
    app.grant_skill(employee, manager, skill_a, 1).await;
    app.seed_resource(skill_a, "Rust in Practice", ResourceLevel::Intermediate);
    app.seed_resource(skill_b, "SQL Basics", ResourceLevel::Beginner);

    let (status, body) = app
        .get_json(&format!(
            "/analytics/employees/{}/recommendations?target_id={}&limit=2",
            employee, target
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    let recommendations = body.as_array().unwrap();
    assert_eq!(recommendations.len(), 2);
    assert_eq!(recommendations[0]["skill_id"], skill_a.to_string());
    assert_eq!(recommendations[0]["resource_level"], "intermediate");
    assert_eq!(recommendations[0]["resources"][0]["title"], "Rust in Practice");
    assert_eq!(recommendations[1]["skill_id"], skill_b.to_string());
    assert_eq!(recommendations[1]["resource_level"], "beginner");
}

#[actix_rt::test]
async fn recommendation_limit_is_honoured() {
    let app = TestApp::spawn().await;
    let employee = app.seed_employee("Ada", None);
    let target = app.seed_target("Mobile");
    for name in ["Swift", "Kotlin", "Dart"] {
        app.require(target, name, 2, Importance::NiceToHave);
    }
    let path = |limit: &str| {
        format!("/analytics/employees/{}/recommendations?target_id={}{}", employee, target, limit)
    };

    let (_, body) = app.get_json(&path("&limit=0")).await;
    assert!(body.as_array().unwrap().is_empty());

    let (_, body) = app.get_json(&path("&limit=1")).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = app.get_json(&path("")).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[actix_rt::test]
async fn negative_limit_is_rejected() {
    let app = TestApp::spawn().await;
    let employee = app.seed_employee("Ada", None);
    let target = app.seed_target("Mobile");

    let (status, body) = app
        .get_json(&format!(
            "/analytics/employees/{}/recommendations?target_id={}&limit=-1",
            employee, target
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "limit");
}
