//! Total duration constraint

use core::fmt::Write;

use heapless::{String, Vec};

use crate::error::{Error, NotFound};
use crate::jacobian::Jacobian;
use crate::problem::Variables;
use crate::schedule::{ContactSchedule, EndeffectorId, MAX_NAME_LEN};
use crate::traits::{BoundList, Bounded, Bounds, Constraint, Differentiable, Values, Variable};

/// Makes the phase durations of one schedule sum to the motion time
///
/// Single equality row: `sum(durations) - t_total = 0`.
#[derive(Debug, Clone)]
pub struct DurationConstraint {
    name: String<MAX_NAME_LEN>,
    /// Variable set name of the constrained schedule
    schedule: String<MAX_NAME_LEN>,
    ee: EndeffectorId,
    t_total: f64,
}

impl DurationConstraint {
    /// Create the constraint for the schedule of `ee`
    ///
    /// Fails with `NotFound` if `vars` holds no schedule for `ee`.
    pub fn new(vars: &Variables, t_total: f64, ee: EndeffectorId) -> Result<Self, Error> {
        let Some(schedule) = vars.schedule(ee) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("Duration constraint: no schedule for ee {}", ee);
            return Err(NotFound::Endeffector(ee).into());
        };

        let mut name = String::new();
        let _ = write!(name, "duration-{}", ee);

        let mut schedule_key = String::new();
        let _ = schedule_key.push_str(schedule.name());

        Ok(Self {
            name,
            schedule: schedule_key,
            ee,
            t_total,
        })
    }

    /// End-effector whose schedule is constrained
    pub fn ee(&self) -> EndeffectorId {
        self.ee
    }

    /// Required sum of all phase durations
    pub fn total_time(&self) -> f64 {
        self.t_total
    }

    fn schedule<'v>(&self, vars: &'v Variables) -> Result<&'v ContactSchedule, Error> {
        vars.get(&self.schedule)
            .ok_or(Error::NotFound(NotFound::Endeffector(self.ee)))
    }
}

impl Bounded for DurationConstraint {
    fn bounds(&self) -> BoundList {
        let mut bounds = Vec::new();
        let _ = bounds.push(Bounds::equality(0.0));
        bounds
    }
}

impl Differentiable for DurationConstraint {
    fn fill_jacobian_block(
        &self,
        var_set: &str,
        vars: &Variables,
        jac: &mut Jacobian,
    ) -> Result<(), Error> {
        if var_set != self.schedule.as_str() {
            return Ok(());
        }

        let schedule = self.schedule(vars)?;
        for col in 0..schedule.phase_count() {
            jac.set(0, col, 1.0)?;
        }
        Ok(())
    }
}

impl Constraint for DurationConstraint {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn rows(&self) -> usize {
        1
    }

    fn values(&self, vars: &Variables) -> Result<Values, Error> {
        let schedule = self.schedule(vars)?;
        let mut values = Vec::new();
        let _ = values.push(schedule.total_time() - self.t_total);
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variables() -> Variables {
        let mut vars = Variables::new();
        vars.add(ContactSchedule::new(0, 1.0, &[0.2, 0.3, 0.5], true, 0.1, 2.0).unwrap())
            .unwrap();
        vars.add(ContactSchedule::new(1, 1.0, &[0.6, 0.4], false, 0.1, 2.0).unwrap())
            .unwrap();
        vars
    }

    #[test]
    fn test_unknown_endeffector() {
        let vars = variables();
        assert_eq!(
            DurationConstraint::new(&vars, 1.0, 3).unwrap_err(),
            Error::NotFound(NotFound::Endeffector(3))
        );
    }

    #[test]
    fn test_values() {
        let vars = variables();

        let c = DurationConstraint::new(&vars, 1.0, 0).unwrap();
        assert_eq!(c.name(), "duration-0");
        assert_eq!(c.rows(), 1);
        let values = c.values(&vars).unwrap();
        assert_eq!(values.len(), 1);
        assert!(values[0].abs() < 1e-12);

        let c = DurationConstraint::new(&vars, 0.8, 0).unwrap();
        let values = c.values(&vars).unwrap();
        assert!((values[0] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_equality() {
        let vars = variables();
        let c = DurationConstraint::new(&vars, 1.0, 1).unwrap();
        assert_eq!(c.bounds().as_slice(), &[Bounds::new(0.0, 0.0)]);
    }

    #[test]
    fn test_jacobian_own_schedule() {
        let vars = variables();
        let c = DurationConstraint::new(&vars, 1.0, 0).unwrap();

        let mut jac = Jacobian::new(1, 3);
        c.fill_jacobian_block("ee-schedule-0", &vars, &mut jac).unwrap();

        assert_eq!(jac.nonzeros(), 3);
        for col in 0..3 {
            assert_eq!(jac.get(0, col), 1.0);
        }
    }

    #[test]
    fn test_jacobian_other_schedule_untouched() {
        let vars = variables();
        let c = DurationConstraint::new(&vars, 1.0, 0).unwrap();

        let mut jac = Jacobian::new(1, 2);
        c.fill_jacobian_block("ee-schedule-1", &vars, &mut jac).unwrap();
        assert_eq!(jac.nonzeros(), 0);

        let mut jac = Jacobian::new(1, 6);
        c.fill_jacobian_block("base-lin", &vars, &mut jac).unwrap();
        assert!(jac.entries().is_empty());
    }

    #[test]
    fn test_shared_schedule() {
        let vars = variables();
        let a = DurationConstraint::new(&vars, 1.0, 1).unwrap();
        let b = DurationConstraint::new(&vars, 1.5, 1).unwrap();

        assert!(a.values(&vars).unwrap()[0].abs() < 1e-12);
        assert!((b.values(&vars).unwrap()[0] + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_tracks_updated_durations() {
        use crate::problem::Problem;
        use crate::testing::Recorder;

        let mut problem: Problem<Recorder> = Problem::new(variables());
        let c = DurationConstraint::new(problem.variables(), 1.0, 0).unwrap();

        problem
            .set_variables("ee-schedule-0", &[0.5, 0.5, 0.5])
            .unwrap();
        let values = c.values(problem.variables()).unwrap();
        assert!((values[0] - 0.5).abs() < 1e-12);
    }
}
