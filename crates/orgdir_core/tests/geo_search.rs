use orgdir_core::db::open_db_in_memory;
use orgdir_core::{
    BoundingBox, Building, BuildingService, GeoPoint, NewBuilding, NewOrganization,
    OrganizationService, RadiusQuery, SqliteActivityRepository, SqliteBuildingRepository,
    SqliteOrganizationRepository,
};
use rusqlite::Connection;

type Service<'conn> = OrganizationService<
    SqliteOrganizationRepository<'conn>,
    SqliteActivityRepository<'conn>,
    SqliteBuildingRepository<'conn>,
>;

fn service(conn: &Connection) -> Service<'_> {
    OrganizationService::new(
        SqliteOrganizationRepository::try_new(conn).unwrap(),
        SqliteActivityRepository::try_new(conn).unwrap(),
        SqliteBuildingRepository::try_new(conn).unwrap(),
    )
}

fn building(conn: &Connection) -> Building {
    BuildingService::new(SqliteBuildingRepository::try_new(conn).unwrap())
        .create_building(NewBuilding {
            name: "Red Square Mall".to_string(),
            address: "Moscow, Red Square 1".to_string(),
            latitude: 55.7539,
            longitude: 37.6208,
        })
        .unwrap()
}

fn seed(conn: &Connection) {
    let tower = building(conn);
    let service = service(conn);
    for (name, location) in [
        ("Red Square", Some((55.7539, 37.6208))),
        ("Tverskaya", Some((55.7575, 37.6136))),
        ("Arbat", Some((55.7494, 37.5931))),
        ("Leninsky", Some((55.7558, 37.6176))),
        ("Outskirts", Some((55.70, 37.50))),
        ("Unlocated", None),
    ] {
        let mut input = NewOrganization::new(name, tower.id);
        if let Some((latitude, longitude)) = location {
            input = input.with_location(latitude, longitude);
        }
        service.create_organization(input).unwrap();
    }
}

fn names(orgs: Vec<orgdir_core::Organization>) -> Vec<String> {
    orgs.into_iter().map(|org| org.name).collect()
}

#[test]
fn radius_search_around_red_square() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);

    let query = RadiusQuery::new(GeoPoint::new(55.7539, 37.6208), 1.0).unwrap();
    let found = names(service(&conn).search_by_radius(&query).unwrap());

    assert!(found.contains(&"Red Square".to_string()));
    assert!(found.contains(&"Tverskaya".to_string()));
    assert!(found.contains(&"Leninsky".to_string()));
    assert!(!found.contains(&"Arbat".to_string()));
    assert!(!found.contains(&"Unlocated".to_string()));
}

#[test]
fn tiny_radius_matches_only_exact_location() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);

    let query = RadiusQuery::new(GeoPoint::new(55.7539, 37.6208), 0.001).unwrap();
    assert_eq!(
        names(service(&conn).search_by_radius(&query).unwrap()),
        ["Red Square"]
    );
}

#[test]
fn rectangle_search_is_inclusive() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);

    let bounds = BoundingBox::new(55.75, 55.76, 37.60, 37.62).unwrap();
    let found = names(service(&conn).search_by_rectangle(&bounds).unwrap());

    assert_eq!(found, ["Leninsky", "Tverskaya"]);
}

#[test]
fn organization_location_is_independent_of_building() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);

    // The building sits on Red Square; the Outskirts organization does not.
    let bounds = BoundingBox::new(55.69, 55.71, 37.49, 37.51).unwrap();
    assert_eq!(
        names(service(&conn).search_by_rectangle(&bounds).unwrap()),
        ["Outskirts"]
    );
}
