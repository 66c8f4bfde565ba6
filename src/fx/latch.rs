//! One-shot visibility latches: `Pending → Triggered`, never reversed.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Latch {
    #[default]
    Pending,
    Triggered,
}

impl Latch {
    /// Trip the latch. Returns true only on the first call.
    pub fn fire(&mut self) -> bool {
        match self {
            Latch::Pending => {
                *self = Latch::Triggered;
                true
            }
            Latch::Triggered => false,
        }
    }

    pub fn is_triggered(self) -> bool {
        self == Latch::Triggered
    }
}

/// One latch per element of an observed group.
#[derive(Debug, Clone, Default)]
pub struct Latches(Vec<Latch>);

impl Latches {
    pub fn new(len: usize) -> Self {
        Latches(vec![Latch::Pending; len])
    }

    /// Trip the latch at `index`. Out-of-range indices never fire.
    pub fn fire(&mut self, index: usize) -> bool {
        self.0.get_mut(index).is_some_and(Latch::fire)
    }

    pub fn is_triggered(&self, index: usize) -> bool {
        self.0.get(index).is_some_and(|l| l.is_triggered())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
