//! Position renumbering for drag-style image moves.
//!
//! An item's images carry an explicit `position` field rather than relying on
//! vector order, because the serialized form is shared with a remote backend
//! that may return images in any order. After every move the positions are
//! rewritten to a contiguous ascending run so that gaps never accumulate.

use crate::model::ItemImage;

/// Move the element at `from` to `to` and renumber positions.
///
/// The input must already be sorted by `position` ascending. Every element in
/// the output gets `position = index + base`. Pure function; `from == to`
/// only renumbers (a no-op on already-contiguous input).
///
/// Both indices must be in range — callers clamp before calling.
pub fn reorder(images: &[ItemImage], from: usize, to: usize, base: u32) -> Vec<ItemImage> {
    let mut result: Vec<ItemImage> = images.to_vec();
    let moved = result.remove(from);
    result.insert(to, moved);

    for (index, image) in result.iter_mut().enumerate() {
        image.position = index as u32 + base;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: &str, position: u32) -> ItemImage {
        ItemImage {
            id: id.to_string(),
            src: format!("data:{id}"),
            alt: None,
            position,
        }
    }

    fn ids(images: &[ItemImage]) -> Vec<&str> {
        images.iter().map(|i| i.id.as_str()).collect()
    }

    fn positions(images: &[ItemImage]) -> Vec<u32> {
        images.iter().map(|i| i.position).collect()
    }

    #[test]
    fn move_first_to_last() {
        let input = vec![image("a", 1), image("b", 2), image("c", 3)];
        let out = reorder(&input, 0, 2, 1);
        assert_eq!(ids(&out), vec!["b", "c", "a"]);
        assert_eq!(positions(&out), vec![1, 2, 3]);
    }

    #[test]
    fn move_last_to_first() {
        let input = vec![image("a", 1), image("b", 2), image("c", 3)];
        let out = reorder(&input, 2, 0, 1);
        assert_eq!(ids(&out), vec!["c", "a", "b"]);
        assert_eq!(positions(&out), vec![1, 2, 3]);
    }

    #[test]
    fn same_index_is_identity_on_contiguous_input() {
        let input = vec![image("a", 1), image("b", 2), image("c", 3)];
        let out = reorder(&input, 1, 1, 1);
        assert_eq!(out, input);
    }

    #[test]
    fn gaps_are_compacted() {
        // Positions with holes (e.g. after an image deletion) come out
        // contiguous even when nothing actually moves.
        let input = vec![image("a", 2), image("b", 5), image("c", 9)];
        let out = reorder(&input, 0, 0, 1);
        assert_eq!(ids(&out), vec!["a", "b", "c"]);
        assert_eq!(positions(&out), vec![1, 2, 3]);
    }

    #[test]
    fn zero_base_renumbers_from_zero() {
        let input = vec![image("a", 0), image("b", 1)];
        let out = reorder(&input, 0, 1, 0);
        assert_eq!(ids(&out), vec!["b", "a"]);
        assert_eq!(positions(&out), vec![0, 1]);
    }

    #[test]
    fn single_element() {
        let input = vec![image("a", 7)];
        let out = reorder(&input, 0, 0, 1);
        assert_eq!(positions(&out), vec![1]);
    }

    #[test]
    fn input_is_untouched() {
        let input = vec![image("a", 1), image("b", 2)];
        let _ = reorder(&input, 0, 1, 1);
        assert_eq!(positions(&input), vec![1, 2]);
    }
}
