/// Cyclic selection over an ordered set of items (form fields, result sections)
pub trait Navigable {
    fn get_item_count(&self) -> usize;

    fn get_selected_index(&self) -> usize;

    fn set_selected_index(&mut self, index: usize);

    /// Moves forward, wrapping to the first item
    fn next_item(&mut self) {
        self.step(1);
    }

    /// Moves back, wrapping to the last item
    fn previous_item(&mut self) {
        let count = self.get_item_count();
        self.step(count.saturating_sub(1));
    }

    fn step(&mut self, offset: usize) {
        let count = self.get_item_count();
        if count == 0 {
            return;
        }
        let current = self.get_selected_index().min(count - 1);
        self.set_selected_index((current + offset) % count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Cursor {
        len: usize,
        index: usize,
    }

    impl Navigable for Cursor {
        fn get_item_count(&self) -> usize {
            self.len
        }

        fn get_selected_index(&self) -> usize {
            self.index
        }

        fn set_selected_index(&mut self, index: usize) {
            self.index = index;
        }
    }

    #[test]
    fn test_wraps_both_directions() {
        let mut cursor = Cursor { len: 3, index: 2 };
        cursor.next_item();
        assert_eq!(cursor.index, 0);
        cursor.previous_item();
        assert_eq!(cursor.index, 2);

        let mut empty = Cursor { len: 0, index: 0 };
        empty.next_item();
        empty.previous_item();
        assert_eq!(empty.index, 0);
    }
}
