//! Full harness lifecycle against the default SQLite backend.
//!
//! Provisioning is allowed once per process, so every case that needs a running
//! environment is part of the single suite in `suite_lifecycle`.

use std::net::TcpListener;

use reqwest::StatusCode;
use sea_orm::EntityTrait;
use smiler::model::{rate::RateDto, user::UserDto};
use smiler_test_utils::{
    fixtures::{comment, rate, user},
    prelude::*,
    CaseOutcome,
};

#[tokio::test]
async fn suite_lifecycle() -> Result<(), TestError> {
    let report = TestSuite::new(TestSettings::for_tests())
        .case("persisted user reads back as generated", |ctx| async move {
            let fixture = user::factory::generate(Some(UserOverrides {
                rating: Some(5),
                ..Default::default()
            }));

            let model = ctx.user().insert(fixture.clone()).await?;
            let stored = ctx.user().all().await?;

            assert_eq!(stored.len(), 1);
            assert_eq!(stored[0].rating, 5);
            assert_eq!(UserFixture::from(model), fixture);

            ctx.before_each_case().await?;

            assert!(ctx.user().all().await?.is_empty());

            Ok(())
        })
        .case("writes records of every kind", |ctx| async move {
            ctx.user().insert_generated(None).await?;
            let (author, rate, comment) = ctx.comment().insert_with_parents(None).await?;

            assert_eq!(rate.author_id, author.id);
            assert_eq!(comment.rate_id, rate.id);
            assert_eq!(ctx.user().all().await?.len(), 2);
            assert_eq!(ctx.rate().all().await?.len(), 1);
            assert_eq!(ctx.comment().all().await?.len(), 1);

            Ok(())
        })
        .case("starts without previous case's records", |ctx| async move {
            assert!(ctx.user().all().await?.is_empty());
            assert!(ctx.rate().all().await?.is_empty());
            assert!(ctx.comment().all().await?.is_empty());

            Ok(())
        })
        .case("identifiers restart after isolation", |ctx| async move {
            let first = ctx.user().insert_generated(None).await?;

            assert_eq!(first.id, 1);

            Ok(())
        })
        .case("application serves the test database", |ctx| async move {
            let resp = ctx.get("/api/health").await?;
            assert_eq!(resp.status(), StatusCode::OK);

            let body: serde_json::Value = resp.json().await?;
            assert_eq!(body["status"], "ok");

            let user = ctx
                .user()
                .insert_generated(Some(UserOverrides {
                    profile: Some(ProfileOverrides {
                        display_name: Some("Smiley".to_string()),
                        ..Default::default()
                    }),
                    ..Default::default()
                }))
                .await?;

            let resp = ctx.get(&format!("/api/users/{}", user.id)).await?;
            assert_eq!(resp.status(), StatusCode::OK);

            let dto: UserDto = resp.json().await?;
            assert_eq!(dto.login, user.login);
            assert_eq!(dto.display_name, "Smiley");

            Ok(())
        })
        .case("application sees harness writes to rates", |ctx| async move {
            let (_, rate) = ctx
                .rate()
                .insert_with_author(Some(RateOverrides {
                    title: Some("Best smile".to_string()),
                    ..Default::default()
                }))
                .await?;
            ctx.comment()
                .insert_generated(Some(CommentOverrides {
                    author_id: Some(rate.author_id),
                    rate_id: Some(rate.id),
                    ..Default::default()
                }))
                .await?;

            let rates: Vec<RateDto> = ctx.get("/api/rates").await?.json().await?;

            assert_eq!(rates.len(), 1);
            assert_eq!(rates[0].title, "Best smile");

            let resp = ctx.get(&format!("/api/rates/{}/comments", rate.id)).await?;
            assert_eq!(resp.status(), StatusCode::OK);

            Ok(())
        })
        .case("missing user is not found", |ctx| async move {
            let resp = ctx.get("/api/users/404").await?;

            assert_eq!(resp.status(), StatusCode::NOT_FOUND);

            Ok(())
        })
        .case("logout without a session succeeds", |ctx| async move {
            let resp = ctx.post("/api/auth/logout").await?;

            assert_eq!(resp.status(), StatusCode::NO_CONTENT);

            Ok(())
        })
        .case("application shares the harness database", |ctx| async move {
            assert_eq!(ctx.settings().backend, DatabaseBackend::Sqlite);
            assert_eq!(ctx.app().local_addr().ip().to_string(), "127.0.0.1");
            assert!(ctx.url("/api/health").starts_with(&ctx.app().url()));

            let user = ctx.user().insert_generated(None).await?;
            let seen_by_app = entity::prelude::SmilerUser::find_by_id(user.id)
                .one(ctx.app().db())
                .await?;

            assert_eq!(seen_by_app, Some(user));

            Ok(())
        })
        .case("failing case is reported", |_ctx| async move {
            Err(TestError::Instance("deliberate failure".to_string()))
        })
        .case("panicking case is reported", |_ctx| async move {
            panic!("deliberate panic");
        })
        .case("runs after failed cases", |ctx| async move {
            assert!(ctx.user().all().await?.is_empty());

            Ok(())
        })
        .run()
        .await?;

    let failures = report.failures();
    assert_eq!(report.cases.len(), 12);
    assert_eq!(failures.len(), 2, "unexpected failures: {:?}", failures);
    assert_eq!(failures[0].0, "failing case is reported");
    assert!(failures[0].1.contains("deliberate failure"));
    assert_eq!(failures[1].0, "panicking case is reported");
    assert!(failures[1].1.contains("deliberate panic"));
    assert_eq!(
        report.cases.last().map(|(_, outcome)| outcome),
        Some(&CaseOutcome::Passed)
    );

    // Provisioning already happened once in this process
    let result = provision(TestSettings::for_tests()).await;
    assert!(matches!(result, Err(TestError::AlreadyProvisioned)));

    Ok(())
}

#[tokio::test]
async fn refuses_production_before_starting_anything() -> Result<(), TestError> {
    let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();

    let result = provision(
        TestSettings::new()
            .mode(ExecutionMode::Production)
            .app_port(PortSelection::Fixed(port)),
    )
    .await;

    assert!(matches!(result, Err(TestError::NonTestEnvironment(ref mode)) if mode == "production"));
    // No listener was opened on the configured port
    TcpListener::bind(("127.0.0.1", port))?;

    Ok(())
}

#[tokio::test]
async fn refuses_unmarked_process() {
    let result = provision(TestSettings::new()).await;

    assert!(matches!(result, Err(TestError::NonTestEnvironment(ref mode)) if mode == "unset"));
}

#[test]
fn factories_produce_unique_records() {
    let users: Vec<_> = (0..50).map(|_| user::factory::generate(None)).collect();
    let rates: Vec<_> = (0..50).map(|_| rate::factory::generate(None)).collect();
    let comments: Vec<_> = (0..50).map(|_| comment::factory::generate(None)).collect();

    for (i, a) in users.iter().enumerate() {
        for b in &users[i + 1..] {
            assert_ne!(a.login, b.login);
            assert_ne!(a.email, b.email);
        }
    }
    assert!(rates.windows(2).all(|w| w[0].title != w[1].title));
    assert!(comments.windows(2).all(|w| w[0].text != w[1].text));
}
