pub fn strides_for_dims(dims: &[usize]) -> Vec<usize> {
    let mut strides = Vec::with_capacity(dims.len());
    let mut stride = 1;
    for &d in dims {
        strides.push(stride);
        stride *= d;
    }

    strides
}

pub fn flatten_idx(dims: &[usize], strides: &[usize], index: &[usize]) -> usize {
    assert!(index.len() == dims.len());

    if index
        .iter()
        .zip(dims.iter())
        .any(|(&idx, &dim_len)| idx >= dim_len)
    {
        panic!("out of bounds");
    }

    flatten_idx_unchecked(strides, index)
}

pub fn flatten_idx_unchecked(strides: &[usize], index: &[usize]) -> usize {
    index.iter().zip(strides).map(|(&idx, &s)| idx * s).sum()
}

pub fn unflatten_idx(dims: &[usize], mut idx: usize) -> Vec<usize> {
    dims.iter()
        .map(|&d| {
            let i = idx % d;
            idx /= d;
            i
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{flatten_idx, strides_for_dims, unflatten_idx};

    #[test]
    fn first_axis_is_contiguous() {
        let dims = [3, 4, 2];
        let strides = strides_for_dims(&dims);
        assert_eq!(strides, [1, 3, 12]);

        assert_eq!(flatten_idx(&dims, &strides, &[1, 0, 0]), 1);
        assert_eq!(flatten_idx(&dims, &strides, &[2, 3, 1]), 23);
        assert_eq!(unflatten_idx(&dims, 23), [2, 3, 1]);
        assert_eq!(unflatten_idx(&dims, 7), [1, 2, 0]);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds() {
        let dims = [3, 4];
        flatten_idx(&dims, &strides_for_dims(&dims), &[3, 0]);
    }
}
