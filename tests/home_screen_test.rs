mod common;

use common::*;
use ecoleta::error::EcoletaError;
use ecoleta::notice::Severity;
use ecoleta::screens::home::HomeScreen;
use ecoleta::types::Selection;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Notify;

fn states_url() -> String {
    url(REGIONS, "estados")
}

fn cities_url(uf: &str) -> String {
    url(REGIONS, &format!("estados/{}/municipios", uf))
}

fn selected(value: &str) -> Selection<String> {
    Selection::Selected(value.to_string())
}

#[tokio::test]
async fn test_states_are_sorted_client_side() {
    let http = FakeHttp::new();
    http.on(
        states_url(),
        Reply::Json(json!([{ "sigla": "SP" }, { "sigla": "AC" }, { "sigla": "RJ" }])),
    );
    let (ctx, _notices) = context(&http, &FakeLocation::denied(), &RecordingLinks::new());

    let home = HomeScreen::mount(ctx).await;

    assert_eq!(home.view().states, vec!["AC", "RJ", "SP"]);
}

#[tokio::test]
async fn test_cities_keep_server_order() {
    let http = FakeHttp::new();
    http.on(states_url(), Reply::Json(json!([{ "sigla": "SP" }])))
        .on(
            cities_url("SP"),
            Reply::Json(json!([{ "nome": "São Paulo" }, { "nome": "Campinas" }, { "nome": "Americana" }])),
        );
    let (ctx, _notices) = context(&http, &FakeLocation::denied(), &RecordingLinks::new());

    let home = HomeScreen::mount(ctx).await;
    home.select_state(selected("SP")).await;

    assert_eq!(home.view().cities, vec!["São Paulo", "Campinas", "Americana"]);
    let calls = http.calls_to(&cities_url("SP"));
    assert_eq!(calls, vec![vec![("orderBy".to_string(), "nome".to_string())]]);
}

#[tokio::test]
async fn test_state_change_resets_city() {
    let http = FakeHttp::new();
    http.on(states_url(), Reply::Json(json!([{ "sigla": "SP" }, { "sigla": "RJ" }])))
        .on(cities_url("SP"), Reply::Json(json!([{ "nome": "Santos" }])))
        .on(cities_url("RJ"), Reply::Json(json!([{ "nome": "Niterói" }, { "nome": "Petrópolis" }])));
    let (ctx, _notices) = context(&http, &FakeLocation::denied(), &RecordingLinks::new());

    let home = HomeScreen::mount(ctx).await;
    home.select_state(selected("SP")).await;
    home.select_city(selected("Santos"));
    assert_eq!(home.view().selected_city, selected("Santos"));

    home.select_state(selected("RJ")).await;

    let view = home.view();
    assert_eq!(view.selected_state, selected("RJ"));
    assert_eq!(view.selected_city, Selection::Unselected);
    assert_eq!(view.cities, vec!["Niterói", "Petrópolis"]);
}

#[tokio::test]
async fn test_unselecting_state_fetches_nothing() {
    let http = FakeHttp::new();
    http.on(states_url(), Reply::Json(json!([{ "sigla": "SP" }])))
        .on(cities_url("SP"), Reply::Json(json!([{ "nome": "Santos" }])));
    let (ctx, _notices) = context(&http, &FakeLocation::denied(), &RecordingLinks::new());

    let home = HomeScreen::mount(ctx).await;
    home.select_state(selected("SP")).await;
    home.select_state(Selection::Unselected).await;

    let view = home.view();
    assert!(view.cities.is_empty());
    assert!(!view.can_enter);
    assert_eq!(http.calls_to(&cities_url("SP")).len(), 1);
}

#[tokio::test]
async fn test_reselecting_same_state_does_not_refetch() {
    let http = FakeHttp::new();
    http.on(states_url(), Reply::Json(json!([{ "sigla": "SP" }])))
        .on(cities_url("SP"), Reply::Json(json!([{ "nome": "Santos" }])));
    let (ctx, _notices) = context(&http, &FakeLocation::denied(), &RecordingLinks::new());

    let home = HomeScreen::mount(ctx).await;
    home.select_state(selected("SP")).await;
    home.select_city(selected("Santos"));
    home.select_state(selected("SP")).await;

    assert_eq!(home.view().selected_city, selected("Santos"));
    assert_eq!(http.calls_to(&cities_url("SP")).len(), 1);
}

#[tokio::test]
async fn test_late_city_list_for_old_state_is_dropped() {
    let gate = Arc::new(Notify::new());
    let http = FakeHttp::new();
    http.on(states_url(), Reply::Json(json!([{ "sigla": "SP" }, { "sigla": "RJ" }])))
        .on(cities_url("SP"), Reply::gated(&gate, Reply::Json(json!([{ "nome": "Santos" }]))))
        .on(cities_url("RJ"), Reply::Json(json!([{ "nome": "Niterói" }])));
    let (ctx, _notices) = context(&http, &FakeLocation::denied(), &RecordingLinks::new());

    let home = HomeScreen::mount(ctx).await;
    tokio::join!(
        home.select_state(selected("SP")),
        home.select_state(selected("RJ")),
        async { gate.notify_one() },
    );

    assert_eq!(home.view().cities, vec!["Niterói"]);
}

#[tokio::test]
async fn test_state_list_failure_is_reported_not_fatal() {
    let http = FakeHttp::new();
    http.on(states_url(), Reply::Fail("connection refused".to_string()));
    let (ctx, mut notices) = context(&http, &FakeLocation::denied(), &RecordingLinks::new());

    let home = HomeScreen::mount(ctx).await;

    assert!(home.view().states.is_empty());
    let notices = drain(&mut notices);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Transient);
    assert!(notices[0].message.contains("states"));
}

#[tokio::test]
async fn test_city_failure_keeps_state_selected() {
    let http = FakeHttp::new();
    http.on(states_url(), Reply::Json(json!([{ "sigla": "SP" }])))
        .on(cities_url("SP"), Reply::Status(503));
    let (ctx, mut notices) = context(&http, &FakeLocation::denied(), &RecordingLinks::new());

    let home = HomeScreen::mount(ctx).await;
    home.select_state(selected("SP")).await;

    let view = home.view();
    assert_eq!(view.selected_state, selected("SP"));
    assert!(view.cities.is_empty());
    assert!(drain(&mut notices)[0].message.contains("503"));
}

#[tokio::test]
async fn test_region_requires_a_state() {
    let http = FakeHttp::new();
    http.on(states_url(), Reply::Json(json!([{ "sigla": "SP" }])))
        .on(cities_url("SP"), Reply::Json(json!([{ "nome": "Santos" }])));
    let (ctx, _notices) = context(&http, &FakeLocation::denied(), &RecordingLinks::new());

    let home = HomeScreen::mount(ctx).await;
    assert!(matches!(home.region(), Err(EcoletaError::InvalidRoutePayload(_))));

    home.select_state(selected("SP")).await;
    let region = home.region().unwrap();
    assert_eq!(region.state_code, "SP");
    assert_eq!(region.city_name, None);

    home.select_city(selected("Santos"));
    assert_eq!(home.region().unwrap().city_name.as_deref(), Some("Santos"));
}

#[tokio::test]
async fn test_unmounted_home_ignores_late_cities() {
    let gate = Arc::new(Notify::new());
    let http = FakeHttp::new();
    http.on(states_url(), Reply::Json(json!([{ "sigla": "SP" }])))
        .on(cities_url("SP"), Reply::gated(&gate, Reply::Json(json!([{ "nome": "Santos" }]))));
    let (ctx, _notices) = context(&http, &FakeLocation::denied(), &RecordingLinks::new());

    let home = HomeScreen::mount(ctx).await;
    tokio::join!(home.select_state(selected("SP")), async {
        home.unmount();
        gate.notify_one();
    });

    assert!(home.view().cities.is_empty());
}
