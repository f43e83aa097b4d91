const ALPHABET: [char; 36] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// Length of the identifiers produced by [`request_id`]
pub const REQUEST_ID_LENGTH: usize = 12;

/// Generates a short identifier that tags every log line of one API call
///
/// Calls may be in flight concurrently, so request and response entries are
/// correlated through this id rather than through ordering.
///
/// # Examples
/// ```
/// use outsider_client::utils::id::request_id;
/// let id = request_id();
/// assert_eq!(id.len(), 12);
/// ```
pub fn request_id() -> String {
    nanoid::nanoid!(REQUEST_ID_LENGTH, &ALPHABET)
}
