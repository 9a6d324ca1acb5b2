// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cinema_domain::{CanonicalStatus, EnrichedBooking, EnrichmentLevel, Film, StatusFilter};

use super::helpers::{
    FakeGateway, at, create_test_booking, create_test_session, test_clock,
};
use crate::{BookingBoard, CancelError, GatewayError, LoadOutcome};

fn standard_gateway() -> FakeGateway {
    FakeGateway::new()
        .with_bookings(vec![
            create_test_booking(1, 10, "completed"),
            create_test_booking(2, 11, "АКТИВНО"),
            create_test_booking(3, 10, "отмена"),
            create_test_booking(4, 12, "active"),
        ])
        .with_sessions(vec![
            create_test_session(10, 100, 1, Some(at(2024, 5, 25, 18, 0))),
            create_test_session(11, 100, 1, Some(at(2024, 6, 3, 18, 0))),
            create_test_session(12, 200, 2, Some(at(2024, 6, 1, 10, 30))),
        ])
        .with_films(vec![
            Film::new(100, "Солярис", Vec::new()),
            Film::new(200, "Сталкер", Vec::new()),
        ])
}

fn ids(bookings: &[EnrichedBooking]) -> Vec<i64> {
    bookings.iter().map(EnrichedBooking::booking_id).collect()
}

fn find(bookings: &[EnrichedBooking], booking_id: i64) -> &EnrichedBooking {
    bookings
        .iter()
        .find(|b| b.booking_id() == booking_id)
        .unwrap()
}

#[tokio::test]
async fn test_load_enriches_and_sorts_bookings() {
    let board: BookingBoard<FakeGateway> = BookingBoard::new(standard_gateway());

    let outcome: LoadOutcome = board.load(7, &test_clock()).await.unwrap();

    assert_eq!(
        outcome,
        LoadOutcome::Applied {
            level: EnrichmentLevel::Full,
            count: 4
        }
    );
    let visible: Vec<EnrichedBooking> = board.visible().await;
    assert_eq!(ids(&visible), vec![4, 2, 1, 3]);
    assert_eq!(find(&visible, 2).film_title, "Солярис");
    assert_eq!(find(&visible, 4).film_title, "Сталкер");
    assert!(find(&visible, 2).can_cancel);
    assert!(!find(&visible, 4).can_cancel);
    assert_eq!(board.loaded_at().await, Some(test_clock().0));
}

#[tokio::test]
async fn test_load_looks_up_each_distinct_id_once_in_two_phases() {
    let board: BookingBoard<FakeGateway> = BookingBoard::new(standard_gateway());
    board.load(7, &test_clock()).await.unwrap();

    let gateway: &FakeGateway = board.gateway();
    assert_eq!(gateway.calls_of("session"), 3);
    assert_eq!(gateway.calls_of("film"), 2);

    let calls: Vec<String> = gateway.calls();
    let last_session: usize = calls.iter().rposition(|c| c.starts_with("session:")).unwrap();
    let first_film: usize = calls.iter().position(|c| c.starts_with("film:")).unwrap();
    assert!(last_session < first_film);
}

#[tokio::test]
async fn test_filter_rederives_visible_list() {
    let board: BookingBoard<FakeGateway> = BookingBoard::new(standard_gateway());
    board.load(7, &test_clock()).await.unwrap();

    let active: Vec<EnrichedBooking> = board
        .set_filter(StatusFilter::Only(CanonicalStatus::Active))
        .await;
    assert_eq!(ids(&active), vec![4, 2]);
    assert_eq!(ids(&board.visible().await), vec![4, 2]);
    assert!(
        board
            .visible_with_status(CanonicalStatus::Completed)
            .await
            .is_empty()
    );

    board.set_filter(StatusFilter::All).await;
    assert_eq!(
        ids(&board.visible_with_status(CanonicalStatus::Cancelled).await),
        vec![3]
    );
}

#[tokio::test]
async fn test_bookings_with_no_known_sessions_load_bare() {
    let gateway: FakeGateway = FakeGateway::new().with_bookings(vec![
        create_test_booking(1, 10, "active"),
        create_test_booking(2, 11, "cancelled"),
    ]);
    let board: BookingBoard<FakeGateway> = BookingBoard::new(gateway);

    let outcome: LoadOutcome = board.load(7, &test_clock()).await.unwrap();

    assert_eq!(
        outcome,
        LoadOutcome::Applied {
            level: EnrichmentLevel::Bare,
            count: 2
        }
    );
    assert_eq!(board.gateway().calls_of("session"), 2);
}

#[tokio::test]
async fn test_failed_session_lookup_degrades_only_its_booking() {
    let gateway: FakeGateway = standard_gateway();
    gateway.failing_sessions.lock().unwrap().insert(11);
    let board: BookingBoard<FakeGateway> = BookingBoard::new(gateway);

    let outcome: LoadOutcome = board.load(7, &test_clock()).await.unwrap();

    assert!(matches!(
        outcome,
        LoadOutcome::Applied {
            level: EnrichmentLevel::Full,
            count: 4
        }
    ));
    let all: Vec<EnrichedBooking> = board.all().await;
    assert!(find(&all, 2).session.is_none());
    assert_eq!(find(&all, 2).film_title, "Фильм");
    assert_eq!(find(&all, 4).film_title, "Сталкер");
}

#[tokio::test]
async fn test_unavailable_sessions_give_bare_bookings() {
    let gateway: FakeGateway = standard_gateway();
    gateway
        .failing_sessions
        .lock()
        .unwrap()
        .extend([10, 11, 12]);
    let board: BookingBoard<FakeGateway> = BookingBoard::new(gateway);

    let outcome: LoadOutcome = board.load(7, &test_clock()).await.unwrap();

    assert_eq!(
        outcome,
        LoadOutcome::Applied {
            level: EnrichmentLevel::Bare,
            count: 4
        }
    );
    assert_eq!(board.gateway().calls_of("film"), 0);
    let all: Vec<EnrichedBooking> = board.all().await;
    assert!(all.iter().all(|b| b.film_title == "Фильм"));
    assert_eq!(find(&all, 2).status, CanonicalStatus::Active);
}

#[tokio::test]
async fn test_unavailable_films_keep_session_times() {
    let gateway: FakeGateway = standard_gateway();
    gateway.failing_films.lock().unwrap().extend([100, 200]);
    let board: BookingBoard<FakeGateway> = BookingBoard::new(gateway);

    let outcome: LoadOutcome = board.load(7, &test_clock()).await.unwrap();

    assert!(matches!(
        outcome,
        LoadOutcome::Applied {
            level: EnrichmentLevel::WithoutFilms,
            ..
        }
    ));
    let all: Vec<EnrichedBooking> = board.all().await;
    assert_eq!(find(&all, 2).film_title, "Фильм #100");
    assert_eq!(find(&all, 2).session_time, Some(at(2024, 6, 3, 18, 0)));
}

#[tokio::test]
async fn test_unauthorized_lookup_aborts_without_touching_state() {
    let board: BookingBoard<FakeGateway> = BookingBoard::new(standard_gateway());
    board.load(7, &test_clock()).await.unwrap();

    board.gateway().unauthorized_sessions.lock().unwrap().insert(12);
    board
        .gateway()
        .bookings
        .lock()
        .unwrap()
        .push(create_test_booking(5, 12, "active"));

    let result = board.load(7, &test_clock()).await;

    assert_eq!(result, Err(GatewayError::Unauthorized));
    assert_eq!(board.all().await.len(), 4);
    assert_eq!(board.level().await, Some(EnrichmentLevel::Full));
}

#[tokio::test]
async fn test_older_load_finishing_last_is_superseded() {
    let gateway: FakeGateway = FakeGateway::holding_first_load()
        .with_bookings(vec![
            create_test_booking(1, 10, "active"),
            create_test_booking(2, 11, "active"),
        ])
        .with_sessions(vec![
            create_test_session(10, 100, 1, Some(at(2024, 6, 3, 18, 0))),
            create_test_session(11, 100, 1, Some(at(2024, 6, 4, 18, 0))),
        ])
        .with_films(vec![Film::new(100, "Солярис", Vec::new())]);
    let board: BookingBoard<FakeGateway> = BookingBoard::new(gateway);
    let clock = test_clock();

    let first = board.load(7, &clock);
    let second = async {
        let outcome = board.load(7, &clock).await;
        board
            .gateway()
            .bookings
            .lock()
            .unwrap()
            .push(create_test_booking(3, 10, "active"));
        board.gateway().release();
        outcome
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first.unwrap(), LoadOutcome::Superseded);
    assert_eq!(
        second.unwrap(),
        LoadOutcome::Applied {
            level: EnrichmentLevel::Full,
            count: 2
        }
    );
    assert_eq!(ids(&board.all().await), vec![1, 2]);
}

#[tokio::test]
async fn test_torn_down_board_ignores_completions() {
    let board: BookingBoard<FakeGateway> = BookingBoard::new(standard_gateway());
    board.teardown();

    let outcome: LoadOutcome = board.load(7, &test_clock()).await.unwrap();

    assert_eq!(outcome, LoadOutcome::Detached);
    assert!(board.is_torn_down());
    assert!(board.all().await.is_empty());
    assert_eq!(board.level().await, None);
}

#[tokio::test]
async fn test_cancel_marks_booking_cancelled() {
    let board: BookingBoard<FakeGateway> = BookingBoard::new(standard_gateway());
    board.load(7, &test_clock()).await.unwrap();
    board
        .set_filter(StatusFilter::Only(CanonicalStatus::Active))
        .await;

    board.cancel(2, &test_clock()).await.unwrap();

    let all: Vec<EnrichedBooking> = board.all().await;
    assert_eq!(find(&all, 2).status, CanonicalStatus::Cancelled);
    assert_eq!(find(&all, 2).booking.status, "cancelled");
    assert!(!find(&all, 2).can_cancel);
    assert_eq!(ids(&board.visible().await), vec![4]);
}

#[tokio::test]
async fn test_cancel_is_refused_locally_inside_the_hour() {
    let board: BookingBoard<FakeGateway> = BookingBoard::new(standard_gateway());
    board.load(7, &test_clock()).await.unwrap();

    assert_eq!(
        board.cancel(4, &test_clock()).await,
        Err(CancelError::NotCancellable { booking_id: 4 })
    );
    assert_eq!(
        board.cancel(1, &test_clock()).await,
        Err(CancelError::NotCancellable { booking_id: 1 })
    );
    assert_eq!(board.cancel(42, &test_clock()).await, Err(CancelError::NotFound));
    assert_eq!(board.gateway().calls_of("cancel"), 0);
}

#[tokio::test]
async fn test_cancel_maps_api_outcomes() {
    let cases: [(GatewayError, CancelError); 4] = [
        (
            GatewayError::Rejected {
                message: String::from("too late"),
            },
            CancelError::WindowClosed,
        ),
        (
            GatewayError::NotFound {
                resource: String::from("bookings/2/cancel"),
            },
            CancelError::NotFound,
        ),
        (GatewayError::Unauthorized, CancelError::AuthExpired),
        (
            GatewayError::Transport(String::from("reset")),
            CancelError::Failed(GatewayError::Transport(String::from("reset"))),
        ),
    ];

    for (api_error, expected) in cases {
        let board: BookingBoard<FakeGateway> = BookingBoard::new(standard_gateway());
        board.load(7, &test_clock()).await.unwrap();
        board
            .gateway()
            .cancel_errors
            .lock()
            .unwrap()
            .insert(2, api_error);

        assert_eq!(board.cancel(2, &test_clock()).await, Err(expected));
        let all: Vec<EnrichedBooking> = board.all().await;
        assert_eq!(find(&all, 2).status, CanonicalStatus::Active);
    }
}
