/// Moves the element at `from` to `to`, shifting the elements in between.
///
/// Returns `false` and leaves `list` untouched when either index is out of
/// range.
pub fn move_item<T>(list: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= list.len() || to >= list.len() {
        return false;
    }
    let item = list.remove(from);
    list.insert(to, item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_forward_and_back() {
        let mut list = vec!['a', 'b', 'c'];
        assert!(move_item(&mut list, 0, 2));
        assert_eq!(list, vec!['b', 'c', 'a']);
        assert!(move_item(&mut list, 2, 0));
        assert_eq!(list, vec!['a', 'b', 'c']);
    }

    #[test]
    fn out_of_range_is_a_no_op() {
        let mut list = vec![1, 2];
        assert!(!move_item(&mut list, 0, 2));
        assert!(!move_item(&mut list, 5, 0));
        assert_eq!(list, vec![1, 2]);
    }
}
