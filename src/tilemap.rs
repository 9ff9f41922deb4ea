/// A 2D row-major grid. Row 0 is the first row in storage; what that row
/// means on screen is up to the owner (see [`crate::pixel_buffer`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }

    /// Reset every cell to the default value, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.fill(T::default());
    }
}

impl<T: Clone> Tilemap<T> {
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({}, {}) out of bounds", x, y);
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Fill the entire map with a value.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// One storage row as a contiguous slice.
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % self.width;
            let y = idx / self.width;
            (x, y, val)
        })
    }

    /// Iterate mutably over all cells with their coordinates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let width = self.width;
        self.data.iter_mut().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_contiguous() {
        let mut map: Tilemap<u8> = Tilemap::new(4, 3);
        map.set(1, 2, 7);
        map.row_mut(0).copy_from_slice(&[1, 2, 3, 4]);

        assert_eq!(map.row(0), &[1, 2, 3, 4]);
        assert_eq!(map.row(2), &[0, 7, 0, 0]);
        assert_eq!(*map.get(3, 0), 4);
    }

    #[test]
    fn test_iter_yields_coordinates() {
        let mut map: Tilemap<u32> = Tilemap::new(3, 2);
        for (x, y, v) in map.iter_mut() {
            *v = (y * 10 + x) as u32;
        }
        assert_eq!(*map.get(2, 1), 12);
        assert_eq!(map.iter().count(), 6);

        map.clear();
        assert!(map.iter().all(|(_, _, &v)| v == 0));
    }
}
