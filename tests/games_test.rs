mod common;

use axum::Router;
use axum::http::StatusCode;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use common::{TestResponse, create_game, get, post_form, register_and_login, test_app};
use dgdb::entities::{game, game_revision, screenshot};

#[tokio::test]
async fn create_game_records_first_revision() {
    let (app, db) = test_app().await;
    let cookie = register_and_login(&app, "alice").await;

    let id = create_game(
        &app,
        &cookie,
        &[("title_romaji", "Foo"), ("description", "A game."), ("title_jp", "")],
    )
    .await;
    assert_eq!(id, 1);

    let stored = game::Entity::find_by_id(id).one(&db).await.unwrap_or_default();
    let stored = stored.unwrap_or_else(|| unreachable!("game was not stored"));
    assert_eq!(stored.title_romaji, "Foo");
    assert!(stored.last_updated.is_none());

    let revisions = game_revision::Entity::find().all(&db).await.unwrap_or_default();
    assert_eq!(revisions.len(), 1);
    let revision = &revisions[0];
    assert_eq!(revision.relation_id, id);
    assert_eq!(revision.message, "(auto) New entry");
    assert_eq!(revision.title_romaji.as_deref(), Some("Foo"));
    assert_eq!(revision.description.as_deref(), Some("A game."));
    assert_eq!(revision.title_jp, None);
    assert_eq!(revision.title_english_official, None);
    assert_eq!(revision.time_stamp, stored.entry_created);
}

#[tokio::test]
async fn create_game_requires_login() {
    let (app, db) = test_app().await;

    let response = post_form(&app, "/game/new", &[("title_romaji", "Foo")], None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/account/login");
    assert_eq!(game::Entity::find().count(&db).await.unwrap_or(1), 0);
}

#[tokio::test]
async fn invalid_game_is_echoed_back() {
    let (app, db) = test_app().await;
    let cookie = register_and_login(&app, "alice").await;

    let response = post_form(
        &app,
        "/game/new",
        &[("title_other", "FOO"), ("description", "kept")],
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let json = response.json();
    assert_eq!(
        json["error"],
        "At least one title is required (abbreviations don't count)"
    );
    assert_eq!(json["form"]["title_other"], "FOO");
    assert_eq!(json["form"]["description"], "kept");
    assert_eq!(json["user"], "alice");

    let bad_screenshot = post_form(
        &app,
        "/game/new",
        &[("title_romaji", "Foo"), ("screenshots", "https://x.example/a.png\nnot a url")],
        Some(&cookie),
    )
    .await;
    assert_eq!(bad_screenshot.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        bad_screenshot.json()["error"],
        "At least one of the screenshot URLs is invalid"
    );

    let too_long = "x".repeat(101);
    let over_limit = post_form(
        &app,
        "/game/new",
        &[("title_romaji", too_long.as_str())],
        Some(&cookie),
    )
    .await;
    assert_eq!(over_limit.json()["error"], "Bypassing the character limit is bad!");

    assert_eq!(game::Entity::find().count(&db).await.unwrap_or(1), 0);
}

#[tokio::test]
async fn edit_records_only_changed_fields() {
    let (app, db) = test_app().await;
    let cookie = register_and_login(&app, "alice").await;
    let id = create_game(
        &app,
        &cookie,
        &[("title_romaji", "Foo"), ("description", "A game.")],
    )
    .await;

    let edited = post_form(
        &app,
        &format!("/game/edit/{id}"),
        &[
            ("title_romaji", "Foo"),
            ("description", "A better game."),
            ("message", "expand description"),
        ],
        Some(&cookie),
    )
    .await;
    assert_eq!(edited.status, StatusCode::SEE_OTHER);
    assert_eq!(edited.location(), format!("/game/view/{id}"));

    let latest = game_revision::Entity::find()
        .order_by_desc(game_revision::Column::Id)
        .one(&db)
        .await
        .unwrap_or_default()
        .unwrap_or_else(|| unreachable!("no revision"));
    assert_eq!(latest.message, "expand description");
    assert_eq!(latest.description.as_deref(), Some("A better game."));
    assert_eq!(latest.title_romaji, None);

    let stored = game::Entity::find_by_id(id)
        .one(&db)
        .await
        .unwrap_or_default()
        .unwrap_or_else(|| unreachable!("game vanished"));
    assert_eq!(stored.description, "A better game.");
    assert_eq!(stored.last_updated, Some(latest.time_stamp));

    let history = get(&app, &format!("/game/revisions/{id}"), None).await;
    assert_eq!(history.status, StatusCode::OK);
    let revisions = history.json()["revisions"].clone();
    assert_eq!(revisions.as_array().map(Vec::len), Some(2));
    assert_eq!(revisions[0]["message"], "expand description");
    assert_eq!(revisions[0]["username"], "alice");
    assert_eq!(revisions[0]["changes"][0]["field"], "description");
    assert_eq!(revisions[1]["changes"][0]["field"], "title_romaji");
}

#[tokio::test]
async fn edit_without_changes_writes_nothing() {
    let (app, db) = test_app().await;
    let cookie = register_and_login(&app, "alice").await;
    let id = create_game(&app, &cookie, &[("title_romaji", "Foo")]).await;

    let response = post_form(
        &app,
        &format!("/game/edit/{id}"),
        &[("title_romaji", "Foo"), ("message", "no-op")],
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json()["error"],
        "Something went wrong; please try again. Did you not make any changes?"
    );
    assert_eq!(response.json()["form"]["message"], "no-op");

    assert_eq!(game_revision::Entity::find().count(&db).await.unwrap_or(0), 1);
    let stored = game::Entity::find_by_id(id).one(&db).await.unwrap_or_default();
    assert!(stored.is_some_and(|g| g.last_updated.is_none()));
}

#[tokio::test]
async fn edit_requires_message_first() {
    let (app, _db) = test_app().await;
    let cookie = register_and_login(&app, "alice").await;
    let id = create_game(&app, &cookie, &[("title_romaji", "Foo")]).await;

    let response = post_form(
        &app,
        &format!("/game/edit/{id}"),
        &[("title_romaji", ""), ("description", "changed")],
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.json()["error"],
        "Please enter a revision message noting what change(s) you made"
    );
}

#[tokio::test]
async fn missing_game_is_404() {
    let (app, _db) = test_app().await;
    let cookie = register_and_login(&app, "alice").await;

    let view = get(&app, "/game/view/42", None).await;
    assert_eq!(view.status, StatusCode::NOT_FOUND);
    assert_eq!(view.json()["error"], "No entry with that ID exists");

    let edit_form = get(&app, "/game/edit/42", Some(&cookie)).await;
    assert_eq!(edit_form.status, StatusCode::NOT_FOUND);

    let edit = post_form(
        &app,
        "/game/edit/42",
        &[("title_romaji", "Foo"), ("message", "edit")],
        Some(&cookie),
    )
    .await;
    assert_eq!(edit.status, StatusCode::NOT_FOUND);

    let history = get(&app, "/game/revisions/42", None).await;
    assert_eq!(history.status, StatusCode::NOT_FOUND);
    assert_eq!(history.json()["error"], "No revisions were found");
}

async fn enabled_screenshots(db: &DatabaseConnection, game_id: i32) -> Vec<String> {
    screenshot::Entity::find()
        .filter(screenshot::Column::GameId.eq(game_id))
        .filter(screenshot::Column::Enabled.eq(true))
        .order_by_asc(screenshot::Column::Url)
        .all(db)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.url)
        .collect()
}

async fn edit_screenshots(
    app: &Router,
    cookie: &str,
    game_id: i32,
    screenshots: &str,
    description: &str,
) -> TestResponse {
    post_form(
        app,
        &format!("/game/edit/{game_id}"),
        &[
            ("title_romaji", "Foo"),
            ("description", description),
            ("screenshots", screenshots),
            ("message", "screenshots"),
        ],
        Some(cookie),
    )
    .await
}

#[tokio::test]
async fn screenshots_follow_latest_submission() {
    let (app, db) = test_app().await;
    let cookie = register_and_login(&app, "alice").await;
    let id = create_game(
        &app,
        &cookie,
        &[
            ("title_romaji", "Foo"),
            ("screenshots", "https://x.example/a.png\r\nhttps://x.example/b.png"),
        ],
    )
    .await;
    assert_eq!(
        enabled_screenshots(&db, id).await,
        ["https://x.example/a.png", "https://x.example/b.png"]
    );

    let next = "https://x.example/b.png\nhttps://x.example/c.jpg";
    let replaced = edit_screenshots(&app, &cookie, id, next, "one").await;
    assert_eq!(replaced.status, StatusCode::SEE_OTHER);
    assert_eq!(
        enabled_screenshots(&db, id).await,
        ["https://x.example/b.png", "https://x.example/c.jpg"]
    );

    // Same list again alongside another change: no conflict, same set
    let repeated = edit_screenshots(&app, &cookie, id, next, "two").await;
    assert_eq!(repeated.status, StatusCode::SEE_OTHER);
    assert_eq!(
        enabled_screenshots(&db, id).await,
        ["https://x.example/b.png", "https://x.example/c.jpg"]
    );

    // Dropped screenshots stay as history
    assert_eq!(screenshot::Entity::find().count(&db).await.unwrap_or(0), 3);

    let cleared = edit_screenshots(&app, &cookie, id, "", "three").await;
    assert_eq!(cleared.status, StatusCode::SEE_OTHER);
    assert!(enabled_screenshots(&db, id).await.is_empty());
    assert_eq!(screenshot::Entity::find().count(&db).await.unwrap_or(0), 3);

    let stored = game::Entity::find_by_id(id).one(&db).await.unwrap_or_default();
    assert!(stored.is_some_and(|g| g.screenshots.is_empty()));
}

#[tokio::test]
async fn edit_form_is_prefilled() {
    let (app, _db) = test_app().await;
    let cookie = register_and_login(&app, "alice").await;
    let id = create_game(
        &app,
        &cookie,
        &[
            ("title_english", "Foo"),
            ("title_english_official", "on"),
            ("screenshots", "https://x.example/a.gif"),
        ],
    )
    .await;

    let form = get(&app, &format!("/game/edit/{id}"), Some(&cookie)).await;
    assert_eq!(form.status, StatusCode::OK);
    let json = form.json();
    assert_eq!(json["title"], "DGDB // edit game");
    assert_eq!(json["formAction"], format!("/game/edit/{id}"));
    assert_eq!(json["form"]["title_english"], "Foo");
    assert_eq!(json["form"]["title_english_official"], "on");
    assert_eq!(json["form"]["screenshots"], "https://x.example/a.gif");
    assert_eq!(json["form"]["message"], "");
}

#[tokio::test]
async fn resubmitting_prefilled_form_is_a_no_op() {
    let (app, db) = test_app().await;
    let cookie = register_and_login(&app, "alice").await;
    let id = create_game(
        &app,
        &cookie,
        &[("title_romaji", "Foo"), ("screenshots", "https://x.example/a.png")],
    )
    .await;
    let reordered = edit_screenshots(
        &app,
        &cookie,
        id,
        "https://x.example/b.png\nhttps://x.example/a.png",
        "one",
    )
    .await;
    assert_eq!(reordered.status, StatusCode::SEE_OTHER);

    let prefill = get(&app, &format!("/game/edit/{id}"), Some(&cookie)).await.json();
    assert_eq!(
        prefill["form"]["screenshots"],
        "https://x.example/b.png\nhttps://x.example/a.png"
    );

    let mut fields: Vec<(String, String)> = prefill["form"]
        .as_object()
        .map(|form| {
            form.iter()
                .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                .filter(|(k, _)| k != "message")
                .collect()
        })
        .unwrap_or_default();
    fields.push(("message".to_string(), "nothing".to_string()));
    let pairs: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

    let resubmitted = post_form(&app, &format!("/game/edit/{id}"), &pairs, Some(&cookie)).await;
    assert_eq!(resubmitted.status, StatusCode::INTERNAL_SERVER_ERROR);

    let described = edit_screenshots(
        &app,
        &cookie,
        id,
        "https://x.example/b.png\nhttps://x.example/a.png",
        "two",
    )
    .await;
    assert_eq!(described.status, StatusCode::SEE_OTHER);

    let latest = game_revision::Entity::find()
        .filter(game_revision::Column::RelationId.eq(id))
        .order_by_desc(game_revision::Column::Id)
        .one(&db)
        .await
        .unwrap_or_default()
        .unwrap_or_else(|| unreachable!("no revision"));
    assert_eq!(latest.description.as_deref(), Some("two"));
    assert_eq!(latest.screenshots, None);
    assert_eq!(
        game_revision::Entity::find()
            .filter(game_revision::Column::RelationId.eq(id))
            .count(&db)
            .await
            .unwrap_or(0),
        3
    );
}

#[tokio::test]
async fn view_game_page() {
    let (app, _db) = test_app().await;
    let cookie = register_and_login(&app, "alice").await;
    let id = create_game(
        &app,
        &cookie,
        &[
            ("title_jp", "ふー"),
            ("title_english", "Foo"),
            ("screenshots", "https://x.example/a.png"),
        ],
    )
    .await;

    let view = get(&app, &format!("/game/view/{id}"), None).await;
    assert_eq!(view.status, StatusCode::OK);
    let json = view.json();
    assert_eq!(json["title"], "DGDB // ふー");
    assert!(json["user"].is_null());
    assert_eq!(json["game"]["title_english"], "Foo");
    assert_eq!(json["screenshots"][0], "https://x.example/a.png");
    assert_eq!(json["ratingCount"], 0);
    assert!(json["ratingBayesian"].is_null());
    assert!(json["userRating"].is_null());
    assert_eq!(json["releases"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn list_sorts_by_requested_column() {
    let (app, _db) = test_app().await;
    let cookie = register_and_login(&app, "alice").await;
    let alpha = create_game(&app, &cookie, &[("title_romaji", "Alpha")]).await;
    let beta = create_game(&app, &cookie, &[("title_romaji", "Beta")]).await;
    let untitled = create_game(&app, &cookie, &[("title_jp", "ガンマ")]).await;

    let beta_id = beta.to_string();
    let rated = post_form(
        &app,
        "/game/updateRating",
        &[("game_id", beta_id.as_str()), ("user_rating", "9")],
        Some(&cookie),
    )
    .await;
    assert_eq!(rated.body, "success");

    let ids = |json: &serde_json::Value| -> Vec<i64> {
        json["games"]
            .as_array()
            .map(|games| games.iter().filter_map(|g| g["id"].as_i64()).collect())
            .unwrap_or_default()
    };

    let default = get(&app, "/game/list", None).await.json();
    assert_eq!(default["title"], "DGDB // game list");
    assert_eq!(default["sort"]["column"], "rating_bayesian");
    assert_eq!(default["sort"]["direction"], "desc");
    assert_eq!(ids(&default), [i64::from(beta), i64::from(alpha), i64::from(untitled)]);
    assert_eq!(default["games"][0]["rating_bayesian"], 7.25);
    assert_eq!(default["games"][0]["ratings"], 1);
    assert_eq!(
        default["sortUrls"]["title_romaji"],
        "/game/list?s=title_romaji&o=asc"
    );

    let desc = get(&app, "/game/list?s=title_romaji&o=desc", None).await.json();
    assert_eq!(ids(&desc), [i64::from(beta), i64::from(alpha), i64::from(untitled)]);
    assert_eq!(
        desc["sortUrls"]["title_romaji"],
        "/game/list?s=title_romaji&o=asc"
    );
    assert_eq!(desc["sortUrls"]["ratings"], "/game/list?s=ratings&o=desc");

    let asc = get(&app, "/game/list?s=title_romaji&o=asc", None).await.json();
    assert_eq!(ids(&asc), [i64::from(alpha), i64::from(beta), i64::from(untitled)]);

    let bogus = get(&app, "/game/list?s=pw_hash&o=asc", None).await.json();
    assert_eq!(bogus["sort"]["column"], "rating_bayesian");
    assert_eq!(bogus["sort"]["direction"], "desc");
}
