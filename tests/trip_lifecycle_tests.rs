//! End-to-end trip lifecycle through the service layer, including the
//! family scenario: a 14-night trip with four travelers, a hotel stay, and
//! dining inside and outside the date window.

use chrono::NaiveDate;

use parkplan::api::{
    DietaryRestriction, MemberPatch, NewDiningReservation, NewHotelReservation, NewPartyMember,
    NewTrip, TicketType, Trip, TripStatus, UserId,
};
use parkplan::db::repositories::LocalRepository;
use parkplan::db::repository::{CatalogRepository, RepositoryError};
use parkplan::db::services;
use parkplan::models::trip::NavigationStep;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn member(name: &str, age: i32) -> NewPartyMember {
    NewPartyMember {
        name: name.to_string(),
        age,
        ticket_type: TicketType::Base,
        dietary_restriction: DietaryRestriction::None,
        das_eligible: false,
    }
}

async fn lewis_family_trip(repo: &LocalRepository) -> Trip {
    services::create_trip(
        repo,
        NewTrip {
            user_id: UserId::new("lewis"),
            name: "Lewis Family Disney Trip".to_string(),
            start_date: date(2025, 7, 16),
            end_date: date(2025, 7, 30),
        },
        vec![
            member("Marcus", 42),
            member("Dana", 40),
            member("Maya", 10),
            member("Eli", 8),
        ],
    )
    .await
    .unwrap()
}

async fn seeded_room(repo: &LocalRepository) -> (parkplan::api::HotelId, parkplan::api::RoomTypeId) {
    let hotels = repo.list_hotels().await.unwrap();
    let rooms = repo.list_room_types(hotels[0].id).await.unwrap();
    (hotels[0].id, rooms[0].id)
}

#[tokio::test]
async fn test_family_scenario_end_to_end() {
    let repo = LocalRepository::new();
    let trip = lewis_family_trip(&repo).await;
    assert_eq!(trip.party_size, 4);
    assert_eq!(trip.length_days(), 14);

    // 14 nights at $320/night comes to $4480.
    let (hotel_id, room_type_id) = seeded_room(&repo).await;
    let stay = services::create_hotel_reservation(
        &repo,
        trip.id,
        NewHotelReservation {
            hotel_id,
            room_type_id,
            check_in: date(2025, 7, 16),
            check_out: date(2025, 7, 30),
            guests: 4,
            price_per_night_cents: Some(32_000),
            confirmed: true,
            confirmation_code: None,
            notes: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(stay.nights(), 14);
    assert_eq!(stay.total_cents(), 448_000);
    assert!(!stay.confirmation_code.is_empty());

    // Dining inside the window succeeds with the full party.
    let restaurants = repo.list_restaurants().await.unwrap();
    let dinner = services::create_dining_reservation(
        &repo,
        trip.id,
        NewDiningReservation {
            restaurant_id: restaurants[0].id,
            date: date(2025, 7, 18),
            time: "6:30 PM".parse().unwrap(),
            party_size: Some(4),
            confirmed: false,
            confirmation_code: None,
            special_requests: None,
            notes: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(dinner.party_size, 4);

    // Dining after the trip ends is rejected before anything is written.
    let err = services::create_dining_reservation(
        &repo,
        trip.id,
        NewDiningReservation {
            restaurant_id: restaurants[0].id,
            date: date(2025, 8, 5),
            time: "6:30 PM".parse().unwrap(),
            party_size: Some(4),
            confirmed: false,
            confirmation_code: None,
            special_requests: None,
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    let bundle = services::get_trip(&repo, trip.id).await.unwrap();
    assert_eq!(bundle.dining_reservations.len(), 1);
    assert_eq!(bundle.hotel_reservations.len(), 1);
}

#[tokio::test]
async fn test_create_trip_requires_a_party() {
    let repo = LocalRepository::new();
    let err = services::create_trip(
        &repo,
        NewTrip {
            user_id: UserId::new("u1"),
            name: "Solo".to_string(),
            start_date: date(2025, 7, 16),
            end_date: date(2025, 7, 30),
        },
        vec![],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[tokio::test]
async fn test_create_trip_rejects_inverted_dates() {
    let repo = LocalRepository::new();
    let err = services::create_trip(
        &repo,
        NewTrip {
            user_id: UserId::new("u1"),
            name: "Backwards".to_string(),
            start_date: date(2025, 7, 30),
            end_date: date(2025, 7, 16),
        },
        vec![member("Ana", 34)],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[tokio::test]
async fn test_shrinking_dates_under_live_reservation_conflicts() {
    let repo = LocalRepository::new();
    let trip = lewis_family_trip(&repo).await;
    let restaurants = repo.list_restaurants().await.unwrap();

    services::create_dining_reservation(
        &repo,
        trip.id,
        NewDiningReservation {
            restaurant_id: restaurants[0].id,
            date: date(2025, 7, 29),
            time: "12:00 PM".parse().unwrap(),
            party_size: None,
            confirmed: true,
            confirmation_code: None,
            special_requests: None,
            notes: None,
        },
    )
    .await
    .unwrap();

    // The new window ends before the dining date; the conflict names it.
    let err = services::update_trip_dates(
        &repo,
        trip.id,
        "Lewis Family Disney Trip".to_string(),
        date(2025, 7, 16),
        date(2025, 7, 25),
    )
    .await
    .unwrap_err();
    match err {
        RepositoryError::ConflictError { message, .. } => {
            assert!(message.contains("2025-07-29"), "message was: {}", message);
        }
        other => panic!("expected conflict, got {:?}", other),
    }

    // The trip window is untouched.
    let bundle = services::get_trip(&repo, trip.id).await.unwrap();
    assert_eq!(bundle.trip.end_date, date(2025, 7, 30));
}

#[tokio::test]
async fn test_shrinking_dates_allowed_once_reservation_cancelled() {
    let repo = LocalRepository::new();
    let trip = lewis_family_trip(&repo).await;
    let restaurants = repo.list_restaurants().await.unwrap();

    let dinner = services::create_dining_reservation(
        &repo,
        trip.id,
        NewDiningReservation {
            restaurant_id: restaurants[0].id,
            date: date(2025, 7, 29),
            time: "12:00 PM".parse().unwrap(),
            party_size: None,
            confirmed: false,
            confirmation_code: None,
            special_requests: None,
            notes: None,
        },
    )
    .await
    .unwrap();

    services::cancel_reservation(&repo, parkplan::api::ReservationRef::Dining(dinner.id))
        .await
        .unwrap();

    let updated = services::update_trip_dates(
        &repo,
        trip.id,
        "Lewis Family Disney Trip".to_string(),
        date(2025, 7, 16),
        date(2025, 7, 25),
    )
    .await
    .unwrap();
    assert_eq!(updated.end_date, date(2025, 7, 25));
}

#[tokio::test]
async fn test_navigation_and_status_updates() {
    let repo = LocalRepository::new();
    let trip = lewis_family_trip(&repo).await;

    let trip = services::set_current_step(&repo, trip.id, NavigationStep::Hotels)
        .await
        .unwrap();
    assert_eq!(trip.current_step, NavigationStep::Hotels);

    let trip = services::set_trip_status(&repo, trip.id, TripStatus::Active)
        .await
        .unwrap();
    assert_eq!(trip.status, TripStatus::Active);
}

#[tokio::test]
async fn test_delete_trip_is_idempotent() {
    let repo = LocalRepository::new();
    let trip = lewis_family_trip(&repo).await;

    services::delete_trip(&repo, trip.id).await.unwrap();
    services::delete_trip(&repo, trip.id).await.unwrap();
    assert!(services::get_trip(&repo, trip.id).await.is_err());
}

#[tokio::test]
async fn test_member_validation_through_services() {
    let repo = LocalRepository::new();
    let trip = lewis_family_trip(&repo).await;

    let err = services::add_member(&repo, trip.id, member("", 30))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    let err = services::add_member(&repo, trip.id, member("Elder", 121))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    let (added, updated) = services::add_member(&repo, trip.id, member("Grandma", 68))
        .await
        .unwrap();
    assert_eq!(added.name, "Grandma");
    assert_eq!(updated.party_size, 5);

    // Patches get the same age check as inserts.
    let err = services::update_member(
        &repo,
        added.id,
        MemberPatch {
            age: Some(-1),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    let patched = services::update_member(
        &repo,
        added.id,
        MemberPatch {
            age: Some(69),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(patched.age, 69);
}
