use parcel_core::db::open_db_in_memory;
use parcel_core::{
    ParcelNumber, ParcelService, ParcelStatus, RecordingNarrator, RepoError,
    SqliteParcelRepository,
};

const ADDRESS_A: &str = "Pskov, Pushkin st. 5";
const ADDRESS_B: &str = "Saratov, Kozlov st. 25";
const ADDRESS_C: &str = "Tver, Lenin av. 1";

#[test]
fn register_assigns_number_and_narrates() {
    let conn = open_db_in_memory().unwrap();
    let narrator = RecordingNarrator::new();
    let service = ParcelService::with_narrator(SqliteParcelRepository::new(&conn), &narrator);

    let parcel = service.register(1, ADDRESS_A).unwrap();

    assert!(parcel.number > 0);
    assert_eq!(parcel.status, ParcelStatus::Registered);
    assert_eq!(service.get(parcel.number).unwrap(), parcel);
    assert_eq!(
        narrator.lines(),
        vec![format!(
            "New parcel #{} to {ADDRESS_A} for client 1 registered at {}",
            parcel.number, parcel.created_at
        )]
    );
}

#[test]
fn next_status_is_monotonic_and_saturates() {
    let conn = open_db_in_memory().unwrap();
    let narrator = RecordingNarrator::new();
    let service = ParcelService::with_narrator(SqliteParcelRepository::new(&conn), &narrator);
    let number = service.register(1, ADDRESS_A).unwrap().number;
    narrator.take();

    let observed: Vec<ParcelStatus> = (0..4).map(|_| service.next_status(number).unwrap()).collect();

    assert_eq!(
        observed,
        vec![
            ParcelStatus::Sent,
            ParcelStatus::Delivered,
            ParcelStatus::Delivered,
            ParcelStatus::Delivered,
        ]
    );
    assert!(observed.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(service.get(number).unwrap().status, ParcelStatus::Delivered);
    assert_eq!(
        narrator.lines(),
        vec![
            format!("Parcel #{number} has new status: sent"),
            format!("Parcel #{number} has new status: delivered"),
        ]
    );
}

#[test]
fn next_status_on_missing_parcel_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let narrator = RecordingNarrator::new();
    let service = ParcelService::with_narrator(SqliteParcelRepository::new(&conn), &narrator);

    let err = service.next_status(77).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(77)));
    assert!(narrator.lines().is_empty());
}

#[test]
fn address_change_and_delete_blocked_after_sending() {
    let conn = open_db_in_memory().unwrap();
    let narrator = RecordingNarrator::new();
    let service = ParcelService::with_narrator(SqliteParcelRepository::new(&conn), &narrator);

    let number = service.register(1, ADDRESS_A).unwrap().number;
    service.change_address(number, ADDRESS_B).unwrap();
    let still = service.get(number).unwrap();
    assert_eq!(still.address, ADDRESS_B);
    assert_eq!(still.status, ParcelStatus::Registered);

    service.next_status(number).unwrap();

    assert!(matches!(
        service.change_address(number, ADDRESS_C).unwrap_err(),
        RepoError::InvalidState { .. }
    ));
    assert!(matches!(
        service.delete(number).unwrap_err(),
        RepoError::InvalidState { .. }
    ));

    let parcel = service.get(number).unwrap();
    assert_eq!(parcel.address, ADDRESS_B);
    assert_eq!(parcel.status, ParcelStatus::Sent);
}

#[test]
fn blank_address_change_after_sending_reports_invalid_state() {
    let conn = open_db_in_memory().unwrap();
    let narrator = RecordingNarrator::new();
    let service = ParcelService::with_narrator(SqliteParcelRepository::new(&conn), &narrator);

    let number = service.register(1, "").unwrap().number;
    service.change_address(number, " ").unwrap();
    assert_eq!(service.get(number).unwrap().address, " ");

    service.next_status(number).unwrap();

    let err = service.change_address(number, "").unwrap_err();
    assert!(matches!(err, RepoError::InvalidState { number: n, .. } if n == number));
    assert_eq!(service.get(number).unwrap().address, " ");
}

#[test]
fn delete_registered_parcel_makes_it_unreachable() {
    let conn = open_db_in_memory().unwrap();
    let narrator = RecordingNarrator::new();
    let service = ParcelService::with_narrator(SqliteParcelRepository::new(&conn), &narrator);

    let number = service.register(1, ADDRESS_A).unwrap().number;
    service.delete(number).unwrap();

    assert!(matches!(service.get(number).unwrap_err(), RepoError::NotFound(n) if n == number));
    assert!(matches!(
        service.next_status(number).unwrap_err(),
        RepoError::NotFound(_)
    ));
}

#[test]
fn print_client_parcels_renders_each_parcel() {
    let conn = open_db_in_memory().unwrap();
    let narrator = RecordingNarrator::new();
    let service = ParcelService::with_narrator(SqliteParcelRepository::new(&conn), &narrator);

    let first = service.register(5, ADDRESS_A).unwrap();
    let second = service.register(5, ADDRESS_B).unwrap();
    service.register(6, ADDRESS_C).unwrap();
    service.next_status(second.number).unwrap();
    narrator.take();

    let listed = service.print_client_parcels(5).unwrap();
    let numbers: Vec<ParcelNumber> = listed.iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![first.number, second.number]);

    assert_eq!(
        narrator.lines(),
        vec![
            "Parcels of client 5:".to_string(),
            format!(
                "Parcel #{} to {ADDRESS_A} for client 5 registered at {}, status registered",
                first.number, first.created_at
            ),
            format!(
                "Parcel #{} to {ADDRESS_B} for client 5 registered at {}, status sent",
                second.number, second.created_at
            ),
            String::new(),
        ]
    );
}

#[test]
fn print_client_parcels_for_unknown_client_prints_header_only() {
    let conn = open_db_in_memory().unwrap();
    let narrator = RecordingNarrator::new();
    let service = ParcelService::with_narrator(SqliteParcelRepository::new(&conn), &narrator);

    assert!(service.print_client_parcels(9).unwrap().is_empty());
    assert_eq!(narrator.lines(), vec!["Parcels of client 9:", ""]);
}
