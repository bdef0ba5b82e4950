//! Scratch provisioning for nearest queries.
//!
//! One flat allocation feeds every query in the batch with exactly its k-sized workspace, so the
//! kernels themselves never allocate and concurrent queries never share a candidate slot.

use mt_logger::{mt_log, Level};

use crate::{Candidate, DistanceValue};

use super::Query;

/// Allocates the batch's scratch buffer: one candidate slot per requested neighbor, summed over
/// the whole batch. Spatial queries contribute no slots.
pub(crate) fn provision<P, G, T: DistanceValue>(queries: &[Query<P, G>]) -> Vec<Candidate<T>> {
    let total = queries.iter().map(Query::scratch_len).sum::<usize>();
    mt_log!(
        Level::Debug,
        "Provisioned {total} candidate slots for {} queries",
        queries.len()
    );
    vec![Candidate::default(); total]
}

/// Splits the scratch buffer into one disjoint sub-range per query, in batch order.
///
/// The sub-range of query `i` starts at the exclusive prefix sum of the scratch lengths of
/// queries `0..i` and has the query's own scratch length; spatial queries get an empty range.
pub(crate) fn chunks<'a, P, G, T: DistanceValue>(
    queries: &[Query<P, G>],
    buffer: &'a mut [Candidate<T>],
) -> Vec<&'a mut [Candidate<T>]> {
    let mut rest = buffer;
    let mut chunks = Vec::with_capacity(queries.len());
    for query in queries {
        let (chunk, tail) = rest.split_at_mut(query.scratch_len());
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}
