//! HTTP tests for the listing resources and the router itself

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use common::{authed, post, property, TestContext};
use serde_json::json;

#[actix_web::test]
async fn test_api_root_lists_resources() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let (status, _, body) = call!(app, TestRequest::get().uri("/api"));
    assert_eq!(status, StatusCode::OK);
    for name in ["properties", "inquiries", "favorites", "new-projects"] {
        let url = body[name].as_str().unwrap_or_default();
        assert!(url.ends_with(&format!("/api/{}/", name)), "{} -> {}", name, url);
    }
}

#[actix_web::test]
async fn test_health_and_unknown_route() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let (status, _, body) = call!(app, TestRequest::get().uri("/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");

    let (status, _, body) = call!(app, TestRequest::get().uri("/api/nothing-here/"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[actix_web::test]
async fn test_property_crud_and_ownership() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);
    let owner = signup!(app, ctx, "owner@example.com");
    let stranger = signup!(app, ctx, "stranger@example.com");

    let (status, _, body) = call!(
        app,
        post("/api/properties/", property("Loft", "Austin", 250000))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "authentication_required");

    let (status, _, created) = call!(
        app,
        authed(post("/api/properties/", property("Loft", "Austin", 250000)), &owner)
    );
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    let detail = format!("/api/properties/{}/", id);

    let (status, _, listed) = call!(app, TestRequest::get().uri("/api/properties/"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["count"], 1);

    call!(app, TestRequest::get().uri(&detail));
    let (status, _, fetched) = call!(app, TestRequest::get().uri(&detail));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["view_count"], 2);

    let patch = json!({ "title": "Sunny Loft" });
    let (status, _, body) = call!(
        app,
        authed(TestRequest::patch().uri(&detail).set_json(&patch), &stranger)
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (status, _, updated) = call!(
        app,
        authed(TestRequest::patch().uri(&detail).set_json(&patch), &owner)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Sunny Loft");
    assert_eq!(updated["city"], "Austin");

    let (status, _, replaced) = call!(
        app,
        authed(TestRequest::put().uri(&detail).set_json(property("Loft", "Dallas", 260000)), &owner)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["city"], "Dallas");

    let (status, _, _) = call!(app, authed(TestRequest::delete().uri(&detail), &stranger));
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _, body) = call!(app, authed(TestRequest::delete().uri(&detail), &owner));
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _, _) = call!(app, TestRequest::get().uri(&detail));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_property_filters() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);
    let owner = signup!(app, ctx, "owner@example.com");

    call!(app, authed(post("/api/properties/", property("Loft", "Austin", 250000)), &owner));
    call!(app, authed(post("/api/properties/", property("Ranch", "Dallas", 450000)), &owner));

    let (status, _, body) = call!(app, TestRequest::get().uri("/api/properties/?city=Austin"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["title"], "Loft");

    let (_, _, body) = call!(
        app,
        TestRequest::get().uri("/api/properties/search/?min_price=300000")
    );
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["title"], "Ranch");

    let (_, _, body) = call!(app, TestRequest::get().uri("/api/properties/?limit=1&page=2"));
    assert_eq!(body["count"], 2);
    assert_eq!(body["results"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["has_prev"], true);

    let (status, _, _) = call!(
        app,
        TestRequest::get().uri("/api/properties/?min_price=5&max_price=1")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = call!(
        app,
        TestRequest::get().uri("/api/properties/?property_type=castle")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (_, _, body) = call!(app, TestRequest::get().uri("/api/properties/featured/"));
    assert_eq!(body["count"], 0);

    let (_, _, body) = call!(
        app,
        authed(TestRequest::get().uri("/api/properties/my_listings/"), &owner)
    );
    assert_eq!(body["count"], 2);
}

#[actix_web::test]
async fn test_unsupported_methods_and_bad_ids() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);
    let user = signup!(app, ctx, "user@example.com");

    let (status, _, body) = call!(app, TestRequest::put().uri("/api/properties/"));
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "method_not_allowed");

    let favorite = format!("/api/favorites/{}/", uuid::Uuid::new_v4());
    let (status, _, _) = call!(
        app,
        authed(TestRequest::patch().uri(&favorite).set_json(json!({})), &user)
    );
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _, _) = call!(app, TestRequest::get().uri("/api/auth/login/"));
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _, _) = call!(app, TestRequest::get().uri("/api/properties/not-a-uuid/"));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = call!(app, authed(TestRequest::post().uri("/api/properties/"), &user));
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_favorites_are_per_user() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);
    let owner = signup!(app, ctx, "owner@example.com");
    let fan = signup!(app, ctx, "fan@example.com");

    let (_, _, listing) = call!(
        app,
        authed(post("/api/properties/", property("Loft", "Austin", 250000)), &owner)
    );
    let id = listing["id"].as_str().unwrap().to_string();
    let action = format!("/api/properties/{}/favorite/", id);

    let (status, _, first) = call!(app, authed(TestRequest::post().uri(&action), &fan));
    assert_eq!(status, StatusCode::CREATED);
    let (_, _, second) = call!(app, authed(TestRequest::post().uri(&action), &fan));
    assert_eq!(first["id"], second["id"]);

    let (_, _, mine) = call!(app, authed(TestRequest::get().uri("/api/favorites/"), &fan));
    assert_eq!(mine["count"], 1);
    let (_, _, theirs) = call!(app, authed(TestRequest::get().uri("/api/favorites/"), &owner));
    assert_eq!(theirs["count"], 0);

    let favorite = format!("/api/favorites/{}/", first["id"].as_str().unwrap());
    let (status, _, _) = call!(app, authed(TestRequest::get().uri(&favorite), &owner));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = call!(app, authed(TestRequest::delete().uri(&action), &fan));
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, _, mine) = call!(app, authed(TestRequest::get().uri("/api/favorites/"), &fan));
    assert_eq!(mine["count"], 0);

    let (status, _, created) = call!(
        app,
        authed(post("/api/favorites/", json!({ "property": id })), &fan)
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["property_id"], id);
}

#[actix_web::test]
async fn test_inquiry_visibility_and_moderation() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);
    let owner = signup!(app, ctx, "owner@example.com");
    let buyer = signup!(app, ctx, "buyer@example.com");
    let stranger = signup!(app, ctx, "stranger@example.com");

    let (_, _, listing) = call!(
        app,
        authed(post("/api/properties/", property("Loft", "Austin", 250000)), &owner)
    );
    let inquiry = json!({
        "property": listing["id"],
        "name": "Buyer",
        "email": "buyer@example.com",
        "message": "Is it still available?"
    });

    let (status, _, created) = call!(app, authed(post("/api/inquiries/", inquiry), &buyer));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending");
    let id = created["id"].as_str().unwrap().to_string();

    let (_, _, owner_view) = call!(app, authed(TestRequest::get().uri("/api/inquiries/"), &owner));
    assert_eq!(owner_view["count"], 1);
    let (_, _, stranger_view) = call!(
        app,
        authed(TestRequest::get().uri("/api/inquiries/"), &stranger)
    );
    assert_eq!(stranger_view["count"], 0);

    let (status, _, _) = call!(
        app,
        authed(TestRequest::get().uri(&format!("/api/inquiries/{}/", id)), &stranger)
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let approve = format!("/api/inquiries/{}/approve/", id);
    let (status, _, _) = call!(app, authed(TestRequest::post().uri(&approve), &buyer));
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, approved) = call!(app, authed(TestRequest::post().uri(&approve), &owner));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "approved");

    let (_, _, rejected) = call!(
        app,
        authed(TestRequest::post().uri(&format!("/api/inquiries/{}/reject/", id)), &owner)
    );
    assert_eq!(rejected["status"], "rejected");

    let (status, _, _) = call!(app, TestRequest::get().uri("/api/inquiries/"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_listing_verification_is_staff_only() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);
    let owner = signup!(app, ctx, "owner@example.com");

    let (_, _, listing) = call!(
        app,
        authed(post("/api/properties/", property("Loft", "Austin", 250000)), &owner)
    );
    let verify = format!("/api/properties/{}/verify/", listing["id"].as_str().unwrap());

    let (status, _, body) = call!(app, authed(TestRequest::post().uri(&verify), &owner));
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");
}

#[actix_web::test]
async fn test_new_projects() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);
    let developer = signup!(app, ctx, "dev@example.com");

    let project = json!({
        "name": "Riverside Towers",
        "developer": "Acme Homes",
        "city": "Austin",
        "possession_status": "under-construction",
        "possession_date": "2027-06-30",
        "total_units": 120,
        "amenities": ["pool", "gym"]
    });
    let (status, _, created) = call!(app, authed(post("/api/new-projects/", project), &developer));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["possession_status"], "under-construction");

    let (_, _, body) = call!(
        app,
        TestRequest::get().uri("/api/new-projects/?possession_status=under-construction")
    );
    assert_eq!(body["count"], 1);
    let (_, _, body) = call!(
        app,
        TestRequest::get().uri("/api/new-projects/?possession_status=upcoming")
    );
    assert_eq!(body["count"], 0);

    let detail = format!("/api/new-projects/{}/", created["id"].as_str().unwrap());
    let (status, _, patched) = call!(
        app,
        authed(
            TestRequest::patch()
                .uri(&detail)
                .set_json(json!({ "possession_status": "ready-to-move" })),
            &developer
        )
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["possession_status"], "ready-to-move");
    assert_eq!(patched["name"], "Riverside Towers");
}
