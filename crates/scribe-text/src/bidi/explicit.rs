//! Explicit levels and directions (UAX-9 rules BD9, P2 and X1–X8).

use tracing::{trace, warn};

use crate::bidi::class::BidiClass;
use crate::bidi::levels::{Level, MAX_DEPTH, NestingOverflow};

/// Levels and working classes produced by the explicit phase.
pub(crate) struct Explicit {
    pub levels: Vec<Level>,
    /// Classes after overrides; X9-removed characters are marked BN.
    pub processing: Vec<BidiClass>,
    pub overflow: Option<NestingOverflow>,
}

/// BD9: index of the matching PDI for every isolate initiator.
///
/// Entries for any other character are `None`. A paragraph separator
/// closes all open isolates.
pub(crate) fn matching_pdis(classes: &[BidiClass]) -> Vec<Option<usize>> {
    let mut matching = vec![None; classes.len()];
    let mut open: Vec<usize> = Vec::new();
    for (i, class) in classes.iter().enumerate() {
        match class {
            BidiClass::LRI | BidiClass::RLI | BidiClass::FSI => open.push(i),
            BidiClass::PDI => {
                if let Some(initiator) = open.pop() {
                    matching[initiator] = Some(i);
                }
            }
            BidiClass::B => open.clear(),
            _ => {}
        }
    }
    matching
}

/// P2: first strong class in `start..end`, skipping isolate contents.
///
/// AL is reported as R. Stops at a paragraph separator.
pub(crate) fn first_strong(
    classes: &[BidiClass],
    matching: &[Option<usize>],
    start: usize,
    end: usize,
) -> Option<BidiClass> {
    let mut i = start;
    while i < end {
        match classes[i] {
            BidiClass::L => return Some(BidiClass::L),
            BidiClass::R | BidiClass::AL => return Some(BidiClass::R),
            BidiClass::B => return None,
            class if class.is_isolate_initiator() => match matching[i] {
                Some(pdi) => i = pdi,
                None => return None,
            },
            _ => {}
        }
        i += 1;
    }
    None
}

#[derive(Debug, Clone, Copy)]
struct Status {
    level: Level,
    override_class: Option<BidiClass>,
    isolate: bool,
}

struct Overflow {
    isolates: usize,
    embeddings: usize,
    record: Option<NestingOverflow>,
}

impl Overflow {
    fn note(&mut self, index: usize) {
        let record = self.record.get_or_insert(NestingOverflow {
            first_index: index,
            dropped: 0,
        });
        record.dropped += 1;
    }
}

/// Rules X1–X8 over the whole scope.
pub(crate) fn compute(
    classes: &[BidiClass],
    matching: &[Option<usize>],
    paragraph_level: Level,
) -> Explicit {
    let n = classes.len();
    let mut levels = vec![paragraph_level; n];
    let mut processing = classes.to_vec();

    let base = Status {
        level: paragraph_level,
        override_class: None,
        isolate: false,
    };
    let mut stack: Vec<Status> = Vec::with_capacity(MAX_DEPTH as usize + 2);
    stack.push(base);
    let mut overflow = Overflow {
        isolates: 0,
        embeddings: 0,
        record: None,
    };
    let mut valid_isolates = 0usize;

    for i in 0..n {
        let class = classes[i];
        let top = *stack.last().unwrap_or(&base);
        match class {
            BidiClass::RLE | BidiClass::LRE | BidiClass::RLO | BidiClass::LRO => {
                let rtl = matches!(class, BidiClass::RLE | BidiClass::RLO);
                let next = if rtl {
                    top.level.next_rtl()
                } else {
                    top.level.next_ltr()
                };
                match next {
                    Some(level) if overflow.isolates == 0 && overflow.embeddings == 0 => {
                        let override_class = match class {
                            BidiClass::RLO => Some(BidiClass::R),
                            BidiClass::LRO => Some(BidiClass::L),
                            _ => None,
                        };
                        stack.push(Status {
                            level,
                            override_class,
                            isolate: false,
                        });
                    }
                    _ => {
                        if overflow.isolates == 0 {
                            overflow.embeddings += 1;
                        }
                        overflow.note(i);
                    }
                }
                levels[i] = top.level;
                processing[i] = BidiClass::BN;
            }
            BidiClass::RLI | BidiClass::LRI | BidiClass::FSI => {
                levels[i] = top.level;
                if let Some(forced) = top.override_class {
                    processing[i] = forced;
                }
                let rtl = match class {
                    BidiClass::RLI => true,
                    BidiClass::LRI => false,
                    _ => {
                        let end = matching[i].unwrap_or(n);
                        first_strong(classes, matching, i + 1, end) == Some(BidiClass::R)
                    }
                };
                let next = if rtl {
                    top.level.next_rtl()
                } else {
                    top.level.next_ltr()
                };
                match next {
                    Some(level) if overflow.isolates == 0 && overflow.embeddings == 0 => {
                        valid_isolates += 1;
                        stack.push(Status {
                            level,
                            override_class: None,
                            isolate: true,
                        });
                    }
                    _ => {
                        overflow.isolates += 1;
                        overflow.note(i);
                    }
                }
            }
            BidiClass::PDI => {
                if overflow.isolates > 0 {
                    overflow.isolates -= 1;
                } else if valid_isolates > 0 {
                    overflow.embeddings = 0;
                    while stack.last().is_some_and(|status| !status.isolate) {
                        stack.pop();
                    }
                    stack.pop();
                    valid_isolates -= 1;
                }
                let top = *stack.last().unwrap_or(&base);
                levels[i] = top.level;
                if let Some(forced) = top.override_class {
                    processing[i] = forced;
                }
            }
            BidiClass::PDF => {
                if overflow.isolates > 0 {
                    // Inside an overflowed isolate: ignored.
                } else if overflow.embeddings > 0 {
                    overflow.embeddings -= 1;
                } else if !top.isolate && stack.len() >= 2 {
                    stack.pop();
                }
                levels[i] = top.level;
                processing[i] = BidiClass::BN;
            }
            BidiClass::B => {
                // X8: every embedding and isolate ends at a paragraph separator.
                stack.truncate(1);
                overflow.isolates = 0;
                overflow.embeddings = 0;
                valid_isolates = 0;
                levels[i] = paragraph_level;
            }
            BidiClass::BN => {
                levels[i] = top.level;
            }
            _ => {
                levels[i] = top.level;
                if let Some(forced) = top.override_class {
                    processing[i] = forced;
                }
            }
        }
    }

    if let Some(record) = overflow.record {
        warn!(
            first_index = record.first_index,
            dropped = record.dropped,
            max_depth = MAX_DEPTH,
            "explicit nesting overflow, ignoring excess formatting characters"
        );
    }
    trace!(chars = n, "explicit levels assigned");

    Explicit {
        levels,
        processing,
        overflow: overflow.record,
    }
}
