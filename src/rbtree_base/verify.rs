use bitmask_enum::bitmask;

#[bitmask(u8)]
pub enum InvariantViolations {
    Ok = 0,
    RedRoot = 1,
    RedSentinel = 2,
    RedRedEdge = 4,
    BlackHeightMismatch = 8,
    OutOfOrder = 16,
    SizeMismatch = 32,
    BrokenParentLink = 64,
}

impl InvariantViolations {
    pub fn is_ok(&self) -> bool {
        *self == Self::Ok
    }

    pub fn has(&self, flag: InvariantViolations) -> bool {
        self.contains(flag)
    }
}
