//! Sparse representation of a pure 0/1 linear program: boolean variables,
//! linear constraints over weighted sums, and one minimization objective.
//! This is the full contract the solver backends consume; they never see the
//! business entities.

/// Handle to one boolean decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub(crate) usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Comparison operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmp {
    Le,
    Eq,
    Ge,
}

/// `terms · x  cmp  rhs`, with terms stored sparsely.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    pub name: String,
    pub terms: Vec<(VarId, f64)>,
    pub cmp: Cmp,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(var, coeff)| coeff * values[var.0])
            .sum()
    }

    /// Whether a value vector satisfies this constraint, within `eps`.
    pub fn is_satisfied(&self, values: &[f64], eps: f64) -> bool {
        let lhs = self.evaluate(values);
        match self.cmp {
            Cmp::Le => lhs <= self.rhs + eps,
            Cmp::Eq => (lhs - self.rhs).abs() <= eps,
            Cmp::Ge => lhs >= self.rhs - eps,
        }
    }
}

/// A complete boolean program under construction.
#[derive(Debug, Default)]
pub struct BoolProblem {
    var_names: Vec<String>,
    constraints: Vec<LinearConstraint>,
    /// Sparse minimization objective; variables absent here have zero cost.
    objective: Vec<(VarId, f64)>,
}

impl BoolProblem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_var(&mut self, name: String) -> VarId {
        let id = VarId(self.var_names.len());
        self.var_names.push(name);
        id
    }

    pub fn add_constraint(
        &mut self,
        name: String,
        terms: Vec<(VarId, f64)>,
        cmp: Cmp,
        rhs: f64,
    ) {
        self.constraints.push(LinearConstraint {
            name,
            terms,
            cmp,
            rhs,
        });
    }

    pub fn add_objective_term(&mut self, var: VarId, coeff: f64) {
        self.objective.push((var, coeff));
    }

    pub fn num_vars(&self) -> usize {
        self.var_names.len()
    }

    pub fn var_name(&self, var: VarId) -> &str {
        &self.var_names[var.0]
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &[(VarId, f64)] {
        &self.objective
    }

    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective
            .iter()
            .map(|(var, coeff)| coeff * values[var.0])
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_evaluation() {
        let mut problem = BoolProblem::new();
        let a = problem.new_var("a".into());
        let b = problem.new_var("b".into());
        problem.add_constraint("pick_one".into(), vec![(a, 1.0), (b, 1.0)], Cmp::Eq, 1.0);
        problem.add_objective_term(a, 3.0);
        problem.add_objective_term(b, 5.0);

        let constraint = &problem.constraints()[0];
        assert!(constraint.is_satisfied(&[1.0, 0.0], 1e-6));
        assert!(!constraint.is_satisfied(&[1.0, 1.0], 1e-6));
        assert_eq!(problem.objective_value(&[0.0, 1.0]), 5.0);
    }
}
