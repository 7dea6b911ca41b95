//! Reliable-queue primitives over a Redis list. The API side pushes, the
//! worker pops through a `:temp` holding queue and acknowledges when done.

use redis::Commands;
use uuid::Uuid;

/// Push an episode id onto the processing queue. The queue carries only the
/// identifier; the worker loads everything else from the database.
pub fn queue_episode(
    con: &mut redis::Connection,
    queue_name: &str,
    episode_id: Uuid,
) -> Result<(), redis::RedisError> {
    con.lpush(queue_name, episode_id.to_string())
}

/// Block until an episode id is available, moving it onto the `:temp`
/// queue so a crashed worker leaves the entry recoverable.
pub fn pop_episode(
    con: &mut redis::Connection,
    queue_name: &str,
) -> Result<String, redis::RedisError> {
    let temp_queue_name = format!("{}:temp", queue_name);

    con.blmove(
        queue_name,
        &temp_queue_name,
        redis::Direction::Right,
        redis::Direction::Left,
        0.0,
    )
}

/// Drop a popped entry from the `:temp` queue once the task has ended,
/// whether it succeeded or failed.
pub fn acknowledge_episode(
    con: &mut redis::Connection,
    queue_name: &str,
    raw_id: &str,
) -> Result<(), redis::RedisError> {
    let temp_queue_name = format!("{}:temp", queue_name);

    con.lrem(&temp_queue_name, 1, raw_id)
}
