//! Demo dataset for local runs: five Moscow buildings, the Food / Cars /
//! Services taxonomy and five organizations.
//!
//! Everything goes through the regular services, so seeded rows obey the
//! same invariants as API writes.

use crate::model::activity::{Activity, NewActivity};
use crate::model::building::NewBuilding;
use crate::model::organization::{NewOrganization, NewPhone};
use crate::repo::activity_repo::SqliteActivityRepository;
use crate::repo::building_repo::SqliteBuildingRepository;
use crate::repo::organization_repo::SqliteOrganizationRepository;
use crate::service::activity_service::ActivityService;
use crate::service::building_service::BuildingService;
use crate::service::error::DirectoryResult;
use crate::service::organization_service::OrganizationService;
use log::info;
use rusqlite::Connection;

/// Row counts written by `seed_demo_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub buildings: usize,
    pub activities: usize,
    pub organizations: usize,
    pub phones: usize,
}

const BUILDINGS: &[(&str, &str, f64, f64)] = &[
    ("Red Square Mall", "Moscow, Red Square 1", 55.7539, 37.6208),
    ("Tverskaya Business Center", "Moscow, Tverskaya st. 1", 55.7575, 37.6136),
    ("Arbat Mall", "Moscow, Arbat st. 1", 55.7494, 37.5931),
    ("Leninsky Business Center", "Moscow, Lenina st. 10", 55.7558, 37.6176),
    ("Pushkinsky Mall", "Moscow, Pushkina st. 15", 55.7558, 37.6176),
];

/// Seeds the demo dataset into a migrated, empty database.
pub fn seed_demo_data(conn: &Connection) -> DirectoryResult<SeedSummary> {
    let buildings = BuildingService::new(SqliteBuildingRepository::try_new(conn)?);
    let activities = ActivityService::new(SqliteActivityRepository::try_new(conn)?);
    let organizations = OrganizationService::new(
        SqliteOrganizationRepository::try_new(conn)?,
        SqliteActivityRepository::try_new(conn)?,
        SqliteBuildingRepository::try_new(conn)?,
    );

    let mut building_ids = Vec::with_capacity(BUILDINGS.len());
    for &(name, address, latitude, longitude) in BUILDINGS {
        let building = buildings.create_building(NewBuilding {
            name: name.to_string(),
            address: address.to_string(),
            latitude,
            longitude,
        })?;
        building_ids.push(building.id);
    }

    let add = |name: &str, parent: Option<&Activity>| {
        activities.create_activity(NewActivity {
            name: name.to_string(),
            parent_id: parent.map(|parent| parent.id),
            ..NewActivity::default()
        })
    };
    let food = add("Food", None)?;
    let cars = add("Cars", None)?;
    let _services = add("Services", None)?;
    let meat = add("Meat products", Some(&food))?;
    let milk = add("Dairy products", Some(&food))?;
    let bread = add("Bakery products", Some(&food))?;
    let trucks = add("Trucks", Some(&cars))?;
    let passenger = add("Passenger cars", Some(&cars))?;
    let parts = add("Spare parts", Some(&passenger))?;
    let accessories = add("Accessories", Some(&passenger))?;

    let catalog = [
        (
            "Horns and Hooves LLC",
            0,
            vec!["2-222-222", "3-333-333"],
            vec![meat.id, milk.id],
        ),
        ("Meat and Milk Ltd", 1, vec!["4-444-444"], vec![meat.id]),
        (
            "AutoService LLC",
            2,
            vec!["5-555-555", "6-666-666"],
            vec![parts.id, accessories.id],
        ),
        ("Bread and Buns Ltd", 3, vec!["7-777-777"], vec![bread.id]),
        ("Russian Trucks LLC", 4, vec!["8-888-888"], vec![trucks.id]),
    ];

    let organization_count = catalog.len();
    let mut phone_count = 0;
    for (name, building_index, phones, activity_ids) in catalog {
        let mut input = NewOrganization::new(name, building_ids[building_index])
            .with_location(55.7558, 37.6176);
        input.description = Some(format!("{name} description"));
        input.address = Some(format!("{name} address"));
        input.phones = phones.into_iter().map(NewPhone::new).collect();
        input.activity_ids = activity_ids;
        let organization = organizations.create_organization(input)?;
        phone_count += organization.phones.len();
    }

    let summary = SeedSummary {
        buildings: building_ids.len(),
        activities: activities.list_activities()?.len(),
        organizations: organization_count,
        phones: phone_count,
    };
    info!(
        "event=seed_demo_data module=seed status=ok buildings={} activities={} organizations={} phones={}",
        summary.buildings, summary.activities, summary.organizations, summary.phones
    );
    Ok(summary)
}
