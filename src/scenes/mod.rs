mod smoke_garden;

pub use smoke_garden::{asset_orbit, SmokeGarden};
pub use smoke_garden::{
    ASSET_ORBIT_RADIUS, BOIL_POSITION, KNOT_FREQUENCY, KNOT_SPIN_FREQUENCY, KNOT_SPIN_STEP, SHAKE_AMPLITUDE,
};
