//! C ABI for an external renderer or UI loop.
//!
//! Handles come from [`Simulation_Create`] and must be released with
//! [`Simulation_Destroy`]. Null handles and out-of-range indices are no-ops.
//! Positions are display positions, relative to the tracked body.

use std::ffi::{CStr, CString, c_char};

use crate::{config::SimulationConfig, simulation::Simulation, vector::Vector};

/// Opaque handle: the simulation plus NUL-terminated copies of each body's
/// name and colour tag. The roster never changes, so the strings stay valid
/// until the handle is destroyed.
pub struct SimulationHandle {
    simulation: Simulation,
    names: Vec<CString>,
    colors: Vec<CString>,
}

impl SimulationHandle {
    fn new(simulation: Simulation) -> Self {
        let names = simulation.bodies().iter().map(|body| c_string(&body.name)).collect();
        let colors = simulation.bodies().iter().map(|body| c_string(&body.color)).collect();
        Self { simulation, names, colors }
    }
}

unsafe fn simulation<'a>(handle: *const SimulationHandle) -> Option<&'a Simulation> {
    unsafe { handle.as_ref() }.map(|handle| &handle.simulation)
}

unsafe fn simulation_mut<'a>(handle: *mut SimulationHandle) -> Option<&'a mut Simulation> {
    unsafe { handle.as_mut() }.map(|handle| &mut handle.simulation)
}

fn c_string(text: &str) -> CString {
    CString::new(text.replace('\0', "")).unwrap_or_default()
}

/// Creates a simulation from the built-in catalog.
///
/// `bodies` is a comma-separated list of catalog identifiers (may be null for
/// the full catalog). Returns null when the parameters are invalid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Create(
    dt: f64,
    trail_length: usize,
    calculations_per_trail: usize,
    calculations_per_frame: usize,
    bodies: *const c_char,
) -> *mut SimulationHandle {
    let mut config = SimulationConfig {
        dt,
        trail_length,
        calculations_per_trail,
        calculations_per_frame,
        ..Default::default()
    };

    if !bodies.is_null() {
        let list = unsafe { CStr::from_ptr(bodies) }.to_string_lossy();
        config.bodies = list
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect();
    }

    match Simulation::new(&config) {
        Ok(sim) => Box::into_raw(Box::new(SimulationHandle::new(sim))),
        Err(err) => {
            log::error!("Simulation_Create failed: {}", err);
            std::ptr::null_mut()
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Destroy(handle: *mut SimulationHandle) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

/// Advances one frame. Returns false if the frame hit coincident bodies
/// (the simulation is then paused).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Step(handle: *mut SimulationHandle) -> bool {
    match unsafe { simulation_mut(handle) } {
        Some(sim) => sim.step().is_ok(),
        None => false,
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_SetRunning(handle: *mut SimulationHandle, running: bool) {
    if let Some(sim) = unsafe { simulation_mut(handle) } {
        sim.running = running;
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetTime(handle: *const SimulationHandle) -> f64 {
    unsafe { simulation(handle) }.map_or(0.0, |sim| sim.time())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodyCount(handle: *const SimulationHandle) -> usize {
    unsafe { simulation(handle) }.map_or(0, |sim| sim.bodies().len())
}

/// Writes the display position of body `index`. Returns false if there is none.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodyPosition(
    handle: *const SimulationHandle,
    index: usize,
    out_x: *mut f64,
    out_y: *mut f64,
) -> bool {
    let Some(sim) = (unsafe { simulation(handle) }) else {
        return false;
    };
    let Some(body) = sim.body(index) else {
        return false;
    };
    let position = body.relative_position(sim.tracked_body());
    unsafe { write_pair(out_x, out_y, position) }
}

/// Display name of body `index`, or null. Borrowed from the handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodyName(handle: *const SimulationHandle, index: usize) -> *const c_char {
    unsafe { handle.as_ref() }
        .and_then(|handle| handle.names.get(index))
        .map_or(std::ptr::null(), |name| name.as_ptr())
}

/// Colour tag of body `index`, or null. Borrowed from the handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodyColor(handle: *const SimulationHandle, index: usize) -> *const c_char {
    unsafe { handle.as_ref() }
        .and_then(|handle| handle.colors.get(index))
        .map_or(std::ptr::null(), |color| color.as_ptr())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodyRadius(handle: *const SimulationHandle, index: usize) -> f64 {
    unsafe { simulation(handle) }
        .and_then(|sim| sim.body(index))
        .map_or(0.0, |body| body.radius)
}

/// Number of display trail points of body `index`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetTrailLength(handle: *const SimulationHandle, index: usize) -> usize {
    unsafe { simulation(handle) }
        .and_then(|sim| sim.body(index).map(|body| body.relative_trail(sim.tracked_body()).count()))
        .unwrap_or(0)
}

/// Writes trail point `point` (0 = most recent) of body `index`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetTrailPoint(
    handle: *const SimulationHandle,
    index: usize,
    point: usize,
    out_x: *mut f64,
    out_y: *mut f64,
) -> bool {
    let Some(sim) = (unsafe { simulation(handle) }) else {
        return false;
    };
    let Some(position) = sim
        .body(index)
        .and_then(|body| body.relative_trail(sim.tracked_body()).nth(point))
    else {
        return false;
    };
    unsafe { write_pair(out_x, out_y, position) }
}

/// Hit-test in view coordinates. Returns the body index, or -1 on a miss.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_FindNearestBody(handle: *const SimulationHandle, x: f64, y: f64) -> isize {
    unsafe { simulation(handle) }
        .and_then(|sim| sim.nearest_index(Vector::new(x, y)))
        .map_or(-1, |index| index as isize)
}

/// Tracks body `index`; a negative index clears tracking.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_SetTracked(handle: *mut SimulationHandle, index: isize) -> bool {
    let Some(sim) = (unsafe { simulation_mut(handle) }) else {
        return false;
    };
    sim.set_tracked(usize::try_from(index).ok())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_SetTranslation(handle: *mut SimulationHandle, x: f64, y: f64) {
    if let Some(sim) = unsafe { simulation_mut(handle) } {
        sim.translation = Vector::new(x, y);
    }
}

unsafe fn write_pair(out_x: *mut f64, out_y: *mut f64, value: Vector) -> bool {
    if out_x.is_null() || out_y.is_null() {
        return false;
    }
    unsafe {
        *out_x = value.x;
        *out_y = value.y;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn create_step_and_query() {
        let roster = CString::new("sun, earth,pluto").unwrap();
        unsafe {
            let handle = Simulation_Create(3600.0, 10, 2, 4, roster.as_ptr());
            assert!(!handle.is_null());
            assert_eq!(Simulation_GetBodyCount(handle), 2);

            assert!(Simulation_Step(handle));
            assert_eq!(Simulation_GetTime(handle), 4.0 * 3600.0);
            assert_eq!(Simulation_GetTrailLength(handle, 1), 2);

            let (mut x, mut y) = (0.0, 0.0);
            assert!(Simulation_GetBodyPosition(handle, 1, &mut x, &mut y));
            assert!(x < -1.5e11);
            assert!(!Simulation_GetBodyPosition(handle, 7, &mut x, &mut y));

            assert!(Simulation_SetTracked(handle, 1));
            assert!(Simulation_GetBodyPosition(handle, 1, &mut x, &mut y));
            assert_eq!((x, y), (0.0, 0.0));
            assert!(Simulation_GetTrailPoint(handle, 0, 0, &mut x, &mut y));
            assert!(Simulation_SetTracked(handle, -1));

            assert_eq!(Simulation_FindNearestBody(handle, 0.0, 0.0), 0);
            assert_eq!(Simulation_FindNearestBody(handle, 1e12, 1e12), -1);

            Simulation_SetRunning(handle, false);
            assert!(Simulation_Step(handle));
            assert_eq!(Simulation_GetTime(handle), 4.0 * 3600.0);

            Simulation_Destroy(handle);
        }
    }

    #[test]
    fn names_and_colors_pass_through() {
        let roster = CString::new("earth,sun,moon").unwrap();
        unsafe {
            let handle = Simulation_Create(60.0, 4, 1, 1, roster.as_ptr());
            assert!(!handle.is_null());

            let text = |ptr: *const c_char| CStr::from_ptr(ptr).to_str().unwrap().to_owned();
            assert_eq!(text(Simulation_GetBodyName(handle, 0)), "The Sun");
            assert_eq!(text(Simulation_GetBodyColor(handle, 0)), "yellow");
            assert_eq!(text(Simulation_GetBodyName(handle, 1)), "Earth");
            assert_eq!(text(Simulation_GetBodyColor(handle, 1)), "blue");
            assert_eq!(text(Simulation_GetBodyName(handle, 2)), "The Moon (Earth)");
            assert_eq!(text(Simulation_GetBodyColor(handle, 2)), "white");

            // still valid after stepping
            assert!(Simulation_Step(handle));
            assert_eq!(text(Simulation_GetBodyName(handle, 1)), "Earth");

            assert!(Simulation_GetBodyName(handle, 3).is_null());
            assert!(Simulation_GetBodyColor(handle, 3).is_null());
            assert!(Simulation_GetBodyName(std::ptr::null(), 0).is_null());

            Simulation_Destroy(handle);
        }
    }

    #[test]
    fn invalid_parameters_yield_null() {
        unsafe {
            assert!(Simulation_Create(0.0, 10, 1, 1, std::ptr::null()).is_null());
            assert!(Simulation_Create(1.0, 10, 0, 1, std::ptr::null()).is_null());
        }
    }

    #[test]
    fn null_handles_are_no_ops() {
        unsafe {
            assert!(!Simulation_Step(std::ptr::null_mut()));
            assert_eq!(Simulation_GetBodyCount(std::ptr::null()), 0);
            assert_eq!(Simulation_FindNearestBody(std::ptr::null(), 0.0, 0.0), -1);
            Simulation_Destroy(std::ptr::null_mut());
        }
    }
}
