use std::rc::Rc;

use crate::*;

#[test]
fn bit_equality() {
    let x = SymbolicBit::Literal(true);
    assert_eq!(x.clone().equals(x), TRUE);

    let x = SymbolicBit::Literal(false);
    assert_eq!(x.clone().equals(x), TRUE);

    let x = SymbolicBit::Variable(0);
    assert_eq!(x.clone().equals(x), TRUE);
}

#[test]
fn double_negation() {
    let x = SymbolicBit::Variable(0);
    assert_eq!(!!x.clone(), x);
}

#[test]
fn conjunction_with_literals() {
    let x = SymbolicBit::Variable(0);
    assert_eq!(x.clone() & FALSE, FALSE);
    assert_eq!(FALSE & x.clone(), FALSE);
    assert_eq!(x.clone() & TRUE, x);
    assert_eq!(TRUE & x.clone(), x);
}

#[test]
fn conjunction_with_negated_self() {
    let x = SymbolicBit::Variable(0);
    assert_eq!(x.clone() & !x.clone(), FALSE);
    assert_eq!(!x.clone() & x.clone(), FALSE);
}

#[test]
fn disjunction_with_literals() {
    let x = SymbolicBit::Variable(0);
    assert_eq!(x.clone() | FALSE, x);
    assert_eq!(FALSE | x.clone(), x);
    assert_eq!(x.clone() | TRUE, TRUE);
}

#[test]
fn truth_tables() {
    for (lhs, rhs) in [(false, false), (false, true), (true, false), (true, true)] {
        let x = SymbolicBit::Literal(lhs);
        let y = SymbolicBit::Literal(rhs);
        assert_eq!(x.clone() & y.clone(), SymbolicBit::Literal(lhs && rhs));
        assert_eq!(x.clone() | y.clone(), SymbolicBit::Literal(lhs || rhs));
        assert_eq!(x ^ y, SymbolicBit::Literal(lhs ^ rhs));
    }
}

#[test]
fn select_literal_condition() {
    let x = SymbolicBit::Variable(0);
    let y = SymbolicBit::Variable(1);
    assert_eq!(TRUE.select(x.clone(), y.clone()), x);
    assert_eq!(FALSE.select(x, y.clone()), y);
}

#[test]
fn select_literal_branches() {
    let x = SymbolicBit::Variable(0);
    assert_eq!(x.clone().select(TRUE, FALSE), x);
    assert_eq!(x.clone().select(FALSE, TRUE), !x);
}

#[test]
fn simplify_direct_construction() {
    let x = SymbolicBit::Variable(0);
    let and = SymbolicBit::And(Rc::new(x.clone()), Rc::new(TRUE));
    assert_eq!(and.simplify(), x);

    let not = SymbolicBit::Not(Rc::new(SymbolicBit::Not(Rc::new(x.clone()))));
    assert_eq!(not.simplify(), x);

    let contradiction = SymbolicBit::And(Rc::new(x.clone()), Rc::new(!x));
    assert_eq!(contradiction.simplify(), FALSE);
}

#[test]
fn literal_conversion() {
    assert_eq!(bool::try_from(TRUE), Ok(true));
    assert_eq!(
        bool::try_from(SymbolicBit::Variable(0)),
        Err(ConcretizationError::NonLiteralBit { bit_index: 0 })
    );
}
