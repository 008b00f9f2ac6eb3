use sym::{Evaluator, SymbolicBitVec, VariableAssignments};

use crate::Value;


/// Evaluates a symbolic result after assigning each input word the paired concrete value.
fn evaluate(result: &Value, inputs: &[(&SymbolicBitVec, u128)]) -> u128 {
    let mut assignments = VariableAssignments::default();
    for (input, value) in inputs {
        let literals = SymbolicBitVec::constant(*value, input.len());
        assignments.extend(VariableAssignments::from_bitvecs(input, &literals));
    }

    let evaluator = Evaluator::new(assignments);
    match result {
        Value::SymbolicBitVec(x) => {
            let x = evaluator
                .evaluate_vec(x)
                .expect("result should be fully assigned");
            u128::try_from(x).expect("result should fit in 128 bits")
        }
        Value::SymbolicBool(x) => {
            let x = evaluator
                .evaluate(x)
                .response
                .expect("result should be fully assigned");
            u128::from(x)
        }
        value => panic!("expected a symbolic result but found {value}"),
    }
}
