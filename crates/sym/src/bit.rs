use std::collections::HashMap;
use std::rc::Rc;

pub const FALSE: SymbolicBit = SymbolicBit::Literal(false);
pub const TRUE: SymbolicBit = SymbolicBit::Literal(true);

/// A two-valued formula node. Nodes are never mutated once built, so subtrees are shared between
/// formulas through reference counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolicBit {
    /// A literal `true` or `false` value.
    Literal(bool),

    /// A variable value. The parameter is the identifier for this variable. Two variables with the
    /// same identifier are equivalent.
    Variable(usize),

    /// The negation of a symbolic bit. The `!` operator should be preferred to this, as it folds
    /// literals and double negations.
    Not(Rc<Self>),

    /// The conjunction of two symbolic bits. The `&` operator should be preferred to this, as it
    /// folds literals and contradictions.
    And(Rc<Self>, Rc<Self>),
}

impl SymbolicBit {
    pub fn maybe_literal(&self) -> Option<bool> {
        match self {
            Self::Literal(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    pub fn equals(self, rhs: Self) -> Self {
        (self.clone() & rhs.clone()) | (!self & !rhs)
    }

    /// Evaluates to `then` when this bit is set and to `otherwise` when it is clear.
    pub fn select(self, then: Self, otherwise: Self) -> Self {
        match self {
            Self::Literal(true) => then,
            Self::Literal(false) => otherwise,
            _ => (self.clone() & then) | (!self & otherwise),
        }
    }

    /// Rebuilds this formula bottom-up through the folding constructors. Nodes that were built
    /// directly with [SymbolicBit::Not] or [SymbolicBit::And] may collapse into literals.
    ///
    /// Each shared node is rebuilt once and the rebuilt node is shared in the result.
    pub fn simplify(&self) -> Self {
        self.simplify_shared(&mut HashMap::new())
    }

    /// Simplifies using `cache`, which maps nodes already visited to their rebuilt form. The cache
    /// is only valid while every node it refers to is alive.
    pub(crate) fn simplify_shared(&self, cache: &mut HashMap<*const Self, Rc<Self>>) -> Self {
        let mut pending = vec![self];
        while let Some(&bit) = pending.last() {
            let key = bit as *const Self;
            if cache.contains_key(&key) {
                pending.pop();
                continue;
            }

            let simplified = match bit {
                Self::Literal(_) | Self::Variable(_) => bit.clone(),
                Self::Not(x) => match cache.get(&Rc::as_ptr(x)) {
                    Some(x) => Self::negate(Rc::clone(x)),
                    None => {
                        pending.push(x);
                        continue;
                    }
                },
                Self::And(x, y) => match (cache.get(&Rc::as_ptr(x)), cache.get(&Rc::as_ptr(y))) {
                    (Some(x), Some(y)) => Self::conjoin(Rc::clone(x), Rc::clone(y)),
                    (x_cached, _) => {
                        pending.push(if x_cached.is_none() { x } else { y });
                        continue;
                    }
                },
            };

            pending.pop();
            cache.insert(key, Rc::new(simplified));
        }

        match cache.get(&(self as *const Self)) {
            Some(simplified) => Self::clone(simplified),
            None => self.clone(),
        }
    }

    /// Negation that folds literals and double negations, reusing `x` when a node is built.
    fn negate(x: Rc<Self>) -> Self {
        if let Self::Literal(value) = *x {
            return Self::Literal(!value);
        }

        if let Self::Not(y) = &*x {
            return Self::clone(y);
        }

        Self::Not(x)
    }

    /// Conjunction that folds literals and contradictions, reusing `x` and `y` when a node is
    /// built.
    fn conjoin(x: Rc<Self>, y: Rc<Self>) -> Self {
        if Rc::ptr_eq(&x, &y) || x.is_identical(&y) {
            return Self::clone(&x);
        }

        match &*x {
            Self::Literal(false) => return FALSE,
            Self::Literal(true) => return Self::clone(&y),
            Self::Not(z) if z.is_identical(&y) => return FALSE,
            _ => (),
        }

        match &*y {
            Self::Literal(false) => return FALSE,
            Self::Literal(true) => return Self::clone(&x),
            Self::Not(z) if z.is_identical(&x) => return FALSE,
            _ => (),
        }

        Self::And(x, y)
    }

    /// Moves uniquely owned children into `pending`, leaving `leaf` in their place.
    fn detach_children(&mut self, pending: &mut Vec<Rc<Self>>, leaf: &mut Option<Rc<Self>>) {
        let children = match self {
            Self::Literal(_) | Self::Variable(_) => return,
            Self::Not(x) => [Some(x), None],
            Self::And(x, y) => [Some(x), Some(y)],
        };

        for child in children.into_iter().flatten() {
            if Rc::get_mut(child).is_some() {
                let leaf = leaf.get_or_insert_with(|| Rc::new(FALSE));
                pending.push(std::mem::replace(child, Rc::clone(leaf)));
            }
        }
    }

    /// Structural equality that stops at shared subtrees.
    fn is_identical(&self, rhs: &Self) -> bool {
        match (self, rhs) {
            (Self::Literal(x), Self::Literal(y)) => x == y,
            (Self::Variable(x), Self::Variable(y)) => x == y,
            (Self::Not(x), Self::Not(y)) => Rc::ptr_eq(x, y) || x.is_identical(y),
            (Self::And(x, y), Self::And(u, v)) => {
                (Rc::ptr_eq(x, u) && Rc::ptr_eq(y, v)) || (Rc::ptr_eq(x, v) && Rc::ptr_eq(y, u))
            }
            _ => false,
        }
    }
}

/// Deep formulas are released with an explicit stack rather than by recursion.
impl Drop for SymbolicBit {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        let mut leaf = None;
        self.detach_children(&mut pending, &mut leaf);
        while let Some(child) = pending.pop() {
            if let Some(mut child) = Rc::into_inner(child) {
                child.detach_children(&mut pending, &mut leaf);
            }
        }
    }
}

impl Default for SymbolicBit {
    fn default() -> Self {
        FALSE
    }
}

impl std::ops::Not for SymbolicBit {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            SymbolicBit::Literal(x) => SymbolicBit::Literal(!x),
            SymbolicBit::Not(ref y) => SymbolicBit::clone(y),
            _ => SymbolicBit::Not(Rc::new(self)),
        }
    }
}

impl std::ops::BitAnd for SymbolicBit {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        SymbolicBit::conjoin(Rc::new(self), Rc::new(rhs))
    }
}

impl std::ops::BitOr for SymbolicBit {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        !(!self & !rhs)
    }
}

impl std::ops::BitXor for SymbolicBit {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        (self.clone() & !rhs.clone()) | (!self & rhs)
    }
}
