//! Isolating run sequences and rules W1–W7, N0–N2 and I1–I2.

use tracing::trace;

use crate::bidi::brackets::{BracketKind, bracket};
use crate::bidi::class::BidiClass;
use crate::bidi::levels::Level;

// BD16 bracket stack limit.
const MAX_BRACKET_STACK: usize = 63;

/// A chain of level runs resolved as one unit (BD13).
#[derive(Debug, Clone)]
pub(crate) struct IsolatingRunSequence {
    /// Character indices in logical order, X9-removed characters excluded.
    pub indices: Vec<usize>,
    pub level: Level,
    pub sos: BidiClass,
    pub eos: BidiClass,
}

/// X10: split the scope into level runs and chain them through matched
/// isolate initiator / PDI pairs.
pub(crate) fn isolating_run_sequences(
    paragraph_level: Level,
    classes: &[BidiClass],
    levels: &[Level],
    matching: &[Option<usize>],
) -> Vec<IsolatingRunSequence> {
    let mut runs: Vec<Vec<usize>> = Vec::new();
    let mut current_level = None;
    for (i, class) in classes.iter().enumerate() {
        if class.is_removed_by_x9() {
            continue;
        }
        match runs.last_mut() {
            Some(run) if current_level == Some(levels[i]) => run.push(i),
            _ => {
                runs.push(vec![i]);
                current_level = Some(levels[i]);
            }
        }
    }

    let mut run_starting_at = vec![None; classes.len()];
    for (r, run) in runs.iter().enumerate() {
        run_starting_at[run[0]] = Some(r);
    }

    let mut consumed = vec![false; runs.len()];
    let mut sequences = Vec::new();
    for r in 0..runs.len() {
        if consumed[r] {
            continue;
        }
        consumed[r] = true;
        let mut indices = runs[r].clone();
        loop {
            let last = indices[indices.len() - 1];
            if !classes[last].is_isolate_initiator() {
                break;
            }
            let next_run = matching[last].and_then(|pdi| run_starting_at[pdi]);
            match next_run {
                Some(next) if !consumed[next] => {
                    consumed[next] = true;
                    indices.extend_from_slice(&runs[next]);
                }
                _ => break,
            }
        }
        sequences.push(sequence_boundaries(paragraph_level, classes, levels, indices));
    }
    sequences
}

fn sequence_boundaries(
    paragraph_level: Level,
    classes: &[BidiClass],
    levels: &[Level],
    indices: Vec<usize>,
) -> IsolatingRunSequence {
    let first = indices[0];
    let last = indices[indices.len() - 1];
    let level = levels[first];

    let before = (0..first)
        .rev()
        .find(|&i| !classes[i].is_removed_by_x9())
        .map_or(paragraph_level, |i| levels[i]);

    let after = if classes[last].is_isolate_initiator() {
        paragraph_level
    } else {
        (last + 1..classes.len())
            .find(|&i| !classes[i].is_removed_by_x9())
            .map_or(paragraph_level, |i| levels[i])
    };

    IsolatingRunSequence {
        indices,
        level,
        sos: level.max(before).direction(),
        eos: level.max(after).direction(),
    }
}

/// Rules W1–W7.
pub(crate) fn resolve_weak(sequence: &IsolatingRunSequence, classes: &mut [BidiClass]) {
    let indices = &sequence.indices;

    // W1
    let mut prev = sequence.sos;
    for &i in indices {
        if classes[i] == BidiClass::NSM {
            classes[i] = match prev {
                BidiClass::LRI | BidiClass::RLI | BidiClass::FSI | BidiClass::PDI => BidiClass::ON,
                other => other,
            };
        }
        prev = classes[i];
    }

    // W2, W3
    let mut last_strong = sequence.sos;
    for &i in indices {
        match classes[i] {
            BidiClass::L | BidiClass::R => last_strong = classes[i],
            BidiClass::AL => {
                last_strong = BidiClass::AL;
                classes[i] = BidiClass::R;
            }
            BidiClass::EN if last_strong == BidiClass::AL => classes[i] = BidiClass::AN,
            _ => {}
        }
    }

    // W4
    for k in 1..indices.len().saturating_sub(1) {
        let before = classes[indices[k - 1]];
        let after = classes[indices[k + 1]];
        let current = classes[indices[k]];
        let joined = match (before, current, after) {
            (BidiClass::EN, BidiClass::ES | BidiClass::CS, BidiClass::EN) => Some(BidiClass::EN),
            (BidiClass::AN, BidiClass::CS, BidiClass::AN) => Some(BidiClass::AN),
            _ => None,
        };
        if let Some(class) = joined {
            classes[indices[k]] = class;
        }
    }

    // W5
    let mut k = 0;
    while k < indices.len() {
        if classes[indices[k]] != BidiClass::ET {
            k += 1;
            continue;
        }
        let start = k;
        while k < indices.len() && classes[indices[k]] == BidiClass::ET {
            k += 1;
        }
        let touches_number = (start > 0 && classes[indices[start - 1]] == BidiClass::EN)
            || (k < indices.len() && classes[indices[k]] == BidiClass::EN);
        if touches_number {
            for &i in &indices[start..k] {
                classes[i] = BidiClass::EN;
            }
        }
    }

    // W6
    for &i in indices {
        if matches!(classes[i], BidiClass::ES | BidiClass::ET | BidiClass::CS) {
            classes[i] = BidiClass::ON;
        }
    }

    // W7
    let mut last_strong = sequence.sos;
    for &i in indices {
        match classes[i] {
            BidiClass::L | BidiClass::R => last_strong = classes[i],
            BidiClass::EN if last_strong == BidiClass::L => classes[i] = BidiClass::L,
            _ => {}
        }
    }
}

/// Strong direction used by N0 and N1: EN and AN count as R.
fn strong_direction(class: BidiClass) -> Option<BidiClass> {
    match class {
        BidiClass::L => Some(BidiClass::L),
        BidiClass::R | BidiClass::AL | BidiClass::EN | BidiClass::AN => Some(BidiClass::R),
        _ => None,
    }
}

/// BD16: bracket pairs as positions within the sequence, sorted by opening.
fn bracket_pairs(
    text: &[char],
    sequence: &IsolatingRunSequence,
    classes: &[BidiClass],
) -> Vec<(usize, usize)> {
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut pairs = Vec::new();
    for (pos, &i) in sequence.indices.iter().enumerate() {
        if classes[i] != BidiClass::ON {
            continue;
        }
        let Some(found) = bracket(text[i]) else {
            continue;
        };
        match found.kind {
            BracketKind::Open => {
                if stack.len() == MAX_BRACKET_STACK {
                    break;
                }
                stack.push((found.opening, pos));
            }
            BracketKind::Close => {
                if let Some(depth) = stack.iter().rposition(|&(opening, _)| opening == found.opening) {
                    pairs.push((stack[depth].1, pos));
                    stack.truncate(depth);
                }
            }
        }
    }
    pairs.sort_unstable();
    pairs
}

/// Rule N0: resolve paired brackets from the strong types they enclose.
pub(crate) fn resolve_brackets(
    text: &[char],
    sequence: &IsolatingRunSequence,
    original: &[BidiClass],
    classes: &mut [BidiClass],
) {
    let pairs = bracket_pairs(text, sequence, classes);
    if pairs.is_empty() {
        return;
    }
    let indices = &sequence.indices;
    let embedding = sequence.level.direction();

    for (open, close) in pairs {
        let mut found_embedding = false;
        let mut found_opposite = false;
        for &i in &indices[open + 1..close] {
            match strong_direction(classes[i]) {
                Some(dir) if dir == embedding => {
                    found_embedding = true;
                    break;
                }
                Some(_) => found_opposite = true,
                None => {}
            }
        }

        let resolved = if found_embedding {
            embedding
        } else if found_opposite {
            let context = indices[..open]
                .iter()
                .rev()
                .find_map(|&i| strong_direction(classes[i]))
                .unwrap_or(sequence.sos);
            if context != embedding {
                context
            } else {
                embedding
            }
        } else {
            continue;
        };

        for pos in [open, close] {
            classes[indices[pos]] = resolved;
            // NSMs after a bracket follow its new class.
            for &i in &indices[pos + 1..] {
                if original[i] != BidiClass::NSM {
                    break;
                }
                classes[i] = resolved;
            }
        }
    }
}

/// Rules N1 and N2.
pub(crate) fn resolve_neutral(sequence: &IsolatingRunSequence, classes: &mut [BidiClass]) {
    let indices = &sequence.indices;
    let embedding = sequence.level.direction();
    let mut k = 0;
    while k < indices.len() {
        if !classes[indices[k]].is_neutral_or_isolate() {
            k += 1;
            continue;
        }
        let start = k;
        while k < indices.len() && classes[indices[k]].is_neutral_or_isolate() {
            k += 1;
        }
        let leading = if start == 0 {
            sequence.sos
        } else {
            strong_direction(classes[indices[start - 1]]).unwrap_or(embedding)
        };
        let trailing = if k == indices.len() {
            sequence.eos
        } else {
            strong_direction(classes[indices[k]]).unwrap_or(embedding)
        };
        let resolved = if leading == trailing { leading } else { embedding };
        for &i in &indices[start..k] {
            classes[i] = resolved;
        }
    }
    trace!(
        level = sequence.level.number(),
        chars = indices.len(),
        "neutrals resolved"
    );
}

/// Rules I1 and I2.
pub(crate) fn resolve_implicit_levels(
    sequence: &IsolatingRunSequence,
    classes: &[BidiClass],
    levels: &mut [Level],
) {
    for &i in &sequence.indices {
        let raise = match (levels[i].is_rtl(), classes[i]) {
            (false, BidiClass::R) => 1,
            (false, BidiClass::AN | BidiClass::EN) => 2,
            (true, BidiClass::L | BidiClass::EN | BidiClass::AN) => 1,
            _ => 0,
        };
        levels[i].raise(raise);
    }
}

/// Characters removed by X9 take the level of the character before them.
pub(crate) fn assign_removed_levels(
    classes: &[BidiClass],
    paragraph_level: Level,
    levels: &mut [Level],
) {
    for i in 0..classes.len() {
        if classes[i].is_removed_by_x9() {
            levels[i] = if i == 0 { paragraph_level } else { levels[i - 1] };
        }
    }
}
