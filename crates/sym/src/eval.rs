use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use crate::{SymbolicBit, SymbolicBitVec};

/// A simple evaluator that evaluates a [SymbolicBit] given a [VariableAssignments].
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    assignments: VariableAssignments,
}

#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Evaluation {
    /// The evaluation response. This may not be populated if there was a symbolic bit without a
    /// known concrete value
    pub response: Option<bool>,

    /// Variables that were used and their assigned value
    pub used_variables: BTreeMap<usize, bool>,

    /// Variables that were used in the evaluation but did not have an assignment
    pub unassigned_variables: BTreeSet<usize>,
}

impl Evaluation {
    fn literal(value: bool) -> Self {
        Self {
            response: Some(value),
            ..Default::default()
        }
    }

    fn merge(mut self, mut other: Self, response: Option<bool>) -> Self {
        self.response = response;
        self.used_variables.append(&mut other.used_variables);
        self.unassigned_variables
            .append(&mut other.unassigned_variables);
        self
    }
}

impl Evaluator {
    /// Create a new instance using the given [VariableAssignments]. The assignments are fixed for
    /// the lifetime of this evaluator.
    pub fn new(assignments: impl Into<VariableAssignments>) -> Self {
        Self {
            assignments: assignments.into(),
        }
    }

    pub fn evaluate(&self, bit: &SymbolicBit) -> Evaluation {
        self.evaluate_shared(bit, &mut HashMap::new())
    }

    /// Evaluates `bit`, reusing and extending `cache` with the evaluation of every node visited.
    /// Shared nodes are evaluated once. The cache is only valid while the nodes it refers to are
    /// alive.
    fn evaluate_shared(
        &self,
        bit: &SymbolicBit,
        cache: &mut HashMap<*const SymbolicBit, Evaluation>,
    ) -> Evaluation {
        let mut pending = vec![bit];
        while let Some(&node) = pending.last() {
            let key = node as *const SymbolicBit;
            if cache.contains_key(&key) {
                pending.pop();
                continue;
            }

            let evaluation = match node {
                SymbolicBit::Literal(x) => Evaluation::literal(*x),
                SymbolicBit::Variable(id) => self.variable(*id),
                SymbolicBit::Not(x) => match cache.get(&Rc::as_ptr(x)) {
                    Some(evaluation) => {
                        let mut evaluation = evaluation.clone();
                        evaluation.response = evaluation.response.map(|x| !x);
                        evaluation
                    }
                    None => {
                        pending.push(x);
                        continue;
                    }
                },
                SymbolicBit::And(lhs, rhs) => {
                    let Some(lhs_evaluation) = cache.get(&Rc::as_ptr(lhs)) else {
                        pending.push(lhs);
                        continue;
                    };

                    if lhs_evaluation.response == Some(false) {
                        // Short circuit, the right-hand side cannot change the result
                        lhs_evaluation.clone()
                    } else {
                        let Some(rhs_evaluation) = cache.get(&Rc::as_ptr(rhs)) else {
                            pending.push(rhs);
                            continue;
                        };

                        match (lhs_evaluation.response, rhs_evaluation.response) {
                            (_, Some(false)) => rhs_evaluation.clone(),
                            (Some(true), Some(true)) => lhs_evaluation
                                .clone()
                                .merge(rhs_evaluation.clone(), Some(true)),
                            _ => lhs_evaluation.clone().merge(rhs_evaluation.clone(), None),
                        }
                    }
                }
            };

            pending.pop();
            cache.insert(key, evaluation);
        }

        cache
            .get(&(bit as *const SymbolicBit))
            .cloned()
            .unwrap_or_default()
    }

    fn variable(&self, id: usize) -> Evaluation {
        match self.assignments.get(id) {
            Some(x) => Evaluation {
                response: Some(x),
                used_variables: std::iter::once((id, x)).collect(),
                ..Default::default()
            },
            None => Evaluation {
                response: None,
                unassigned_variables: std::iter::once(id).collect(),
                ..Default::default()
            },
        }
    }

    /// Evaluates every bit of `value`. Returns a literal-only vector, or `None` if any bit depends
    /// on an unassigned variable. Nodes shared between bits are evaluated once.
    pub fn evaluate_vec(&self, value: &SymbolicBitVec) -> Option<SymbolicBitVec> {
        let mut cache = HashMap::new();
        value
            .iter()
            .map(|bit| {
                self.evaluate_shared(bit, &mut cache)
                    .response
                    .map(SymbolicBit::Literal)
            })
            .collect()
    }
}

impl From<VariableAssignments> for Evaluator {
    fn from(value: VariableAssignments) -> Self {
        Self::new(value)
    }
}

/// Mapping [SymbolicBit::Variable] identifiers to [SymbolicBit::Literal] values.
#[derive(Clone, Debug, Default)]
pub struct VariableAssignments {
    assignments: BTreeMap<usize, bool>,
}

impl VariableAssignments {
    /// Create variable assignments given a [SymbolicBitVec] containing only [SymbolicBit::Variable]
    /// variants and another [SymbolicBitVec] containing only [SymbolicBit::Literal] variants.
    /// Incorrect variants in either will be ignored.
    ///
    /// Both bit vectors should have the same length. In the event they are not equal, the shorter
    /// length will be used for both.
    pub fn from_bitvecs(variables: &SymbolicBitVec, literals: &SymbolicBitVec) -> Self {
        let iter =
            std::iter::zip(variables.iter(), literals.iter()).filter_map(|(variable, literal)| {
                if let SymbolicBit::Variable(variable) = variable
                    && let SymbolicBit::Literal(literal) = literal
                {
                    return Some((*variable, *literal));
                }

                None
            });
        Self::from_iter(iter)
    }

    pub fn get(&self, variable_id: usize) -> Option<bool> {
        self.assignments.get(&variable_id).copied()
    }

    /// Adds the assignments of `other`, replacing existing ones for the same variables.
    pub fn extend(&mut self, other: Self) {
        self.assignments.extend(other.assignments);
    }
}

impl<I: IntoIterator<Item = (usize, bool)>> From<I> for VariableAssignments {
    fn from(iter: I) -> Self {
        iter.into_iter().collect()
    }
}

impl FromIterator<(usize, bool)> for VariableAssignments {
    fn from_iter<T: IntoIterator<Item = (usize, bool)>>(iter: T) -> Self {
        Self {
            assignments: iter.into_iter().collect(),
        }
    }
}
