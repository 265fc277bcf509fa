use crate::args::{ScanArgs, SingleArgs};

pub(in crate::entry) enum RunPlan {
    Scan(ScanArgs),
    Single(SingleArgs),
}

impl RunPlan {
    pub(super) const fn name(&self) -> &'static str {
        match self {
            RunPlan::Scan(_) => "scan",
            RunPlan::Single(_) => "single",
        }
    }
}
