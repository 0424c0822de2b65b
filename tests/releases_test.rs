mod common;

use axum::http::StatusCode;
use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder};

use common::{create_game, get, post_form, register_and_login, test_app};
use dgdb::entities::{release, release_revision};

#[tokio::test]
async fn create_release_for_game() {
    let (app, db) = test_app().await;
    let cookie = register_and_login(&app, "alice").await;
    let game_id = create_game(&app, &cookie, &[("title_romaji", "Foo")]).await;

    let form = get(&app, &format!("/release/new/{game_id}"), Some(&cookie)).await;
    assert_eq!(form.status, StatusCode::OK);
    assert_eq!(form.json()["formAction"], format!("/release/new/{game_id}"));

    let created = post_form(
        &app,
        &format!("/release/new/{game_id}"),
        &[("platform", "PC"), ("release_date", "2004-??-??")],
        Some(&cookie),
    )
    .await;
    assert_eq!(created.status, StatusCode::SEE_OTHER);
    assert_eq!(created.location(), format!("/game/view/{game_id}"));

    let revisions = release_revision::Entity::find().all(&db).await.unwrap_or_default();
    assert_eq!(revisions.len(), 1);
    assert_eq!(revisions[0].message, "(auto) New entry");
    assert_eq!(revisions[0].platform.as_deref(), Some("PC"));
    assert_eq!(revisions[0].release_date.as_deref(), Some("2004-??-??"));
    assert_eq!(revisions[0].title, None);

    let view = get(&app, &format!("/game/view/{game_id}"), None).await.json();
    assert_eq!(view["releases"][0]["platform"], "PC");
}

#[tokio::test]
async fn release_validation() {
    let (app, db) = test_app().await;
    let cookie = register_and_login(&app, "alice").await;
    let game_id = create_game(&app, &cookie, &[("title_romaji", "Foo")]).await;
    let uri = format!("/release/new/{game_id}");

    let no_platform = post_form(&app, &uri, &[("title", "Foo")], Some(&cookie)).await;
    assert_eq!(no_platform.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(no_platform.json()["error"], "A platform is required");
    assert_eq!(no_platform.json()["form"]["title"], "Foo");

    let bad_date = post_form(
        &app,
        &uri,
        &[("platform", "PC"), ("release_date", "28/12/2004")],
        Some(&cookie),
    )
    .await;
    assert_eq!(bad_date.status, StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(release::Entity::find().count(&db).await.unwrap_or(1), 0);
}

#[tokio::test]
async fn release_for_missing_game_is_404() {
    let (app, _db) = test_app().await;
    let cookie = register_and_login(&app, "alice").await;

    let form = get(&app, "/release/new/9", Some(&cookie)).await;
    assert_eq!(form.status, StatusCode::NOT_FOUND);

    let created = post_form(&app, "/release/new/9", &[("platform", "PC")], Some(&cookie)).await;
    assert_eq!(created.status, StatusCode::NOT_FOUND);
    assert_eq!(created.json()["error"], "No entry with that ID exists");
}

#[tokio::test]
async fn edit_release_records_diff() {
    let (app, db) = test_app().await;
    let cookie = register_and_login(&app, "alice").await;
    let game_id = create_game(&app, &cookie, &[("title_romaji", "Foo")]).await;
    post_form(
        &app,
        &format!("/release/new/{game_id}"),
        &[("platform", "PC"), ("version", "1.0")],
        Some(&cookie),
    )
    .await;

    let prefill = get(&app, "/release/edit/1", Some(&cookie)).await.json();
    assert_eq!(prefill["form"]["version"], "1.0");
    assert_eq!(prefill["gameId"], game_id);

    let edited = post_form(
        &app,
        "/release/edit/1",
        &[("platform", "PC"), ("version", "1.1"), ("message", "patch")],
        Some(&cookie),
    )
    .await;
    assert_eq!(edited.status, StatusCode::SEE_OTHER);
    assert_eq!(edited.location(), format!("/game/view/{game_id}"));

    let latest = release_revision::Entity::find()
        .order_by_desc(release_revision::Column::Id)
        .one(&db)
        .await
        .unwrap_or_default()
        .unwrap_or_else(|| unreachable!("no revision"));
    assert_eq!(latest.version.as_deref(), Some("1.1"));
    assert_eq!(latest.platform, None);

    let stored = release::Entity::find_by_id(1)
        .one(&db)
        .await
        .unwrap_or_default()
        .unwrap_or_else(|| unreachable!("release vanished"));
    assert_eq!(stored.last_updated, Some(latest.time_stamp));

    let unchanged = post_form(
        &app,
        "/release/edit/1",
        &[("platform", "PC"), ("version", "1.1"), ("message", "again")],
        Some(&cookie),
    )
    .await;
    assert_eq!(unchanged.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(release_revision::Entity::find().count(&db).await.unwrap_or(0), 2);

    let history = get(&app, "/release/revisions/1", None).await.json();
    assert_eq!(history["revisions"][0]["message"], "patch");
    assert_eq!(history["revisions"][0]["kind"], "release");
    assert_eq!(history["revisions"][1]["message"], "(auto) New entry");

    let missing = get(&app, "/release/revisions/7", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.json()["error"], "No revisions were found");
}
