use anyhow::{anyhow, Result};
use mongodb::{
    bson::{self, doc, oid::ObjectId, to_bson, Document},
    Collection,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

/// Conversion between a domain entity and the document layout it is stored
/// under. Every mongo repository defines one driver-level document struct
/// implementing this.
pub trait MongoDocument<E>: Serialize + DeserializeOwned {
    fn to_domain(self) -> E;
    fn from_domain(entity: &E) -> Self;
    fn get_id_filter(&self) -> Document;
}

fn get_id_filter(oid: &ObjectId) -> Document {
    doc! {
        "_id": oid
    }
}

fn entity_to_persistence<E, D: MongoDocument<E>>(entity: &E) -> Result<Document> {
    let raw = D::from_domain(entity);
    doc_to_persistence(&raw)
}

fn persistence_to_entity<E, D: MongoDocument<E>>(doc: Document) -> Result<E> {
    let raw: D = bson::from_document(doc)?;
    Ok(raw.to_domain())
}

fn doc_to_persistence<E, D: MongoDocument<E>>(raw: &D) -> Result<Document> {
    let doc = to_bson(raw)?
        .as_document()
        .ok_or_else(|| anyhow!("Entity did not serialize to a document"))?
        .to_owned();
    Ok(doc)
}

pub async fn insert<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entity: &E,
) -> Result<()> {
    let doc = entity_to_persistence::<E, D>(entity)?;
    collection.insert_one(doc, None).await?;
    Ok(())
}

pub async fn save<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entity: &E,
) -> Result<()> {
    let raw = D::from_domain(entity);
    let filter = raw.get_id_filter();
    let doc = doc_to_persistence(&raw)?;
    collection.replace_one(filter, doc, None).await?;
    Ok(())
}

pub async fn find<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    id: &ObjectId,
) -> Option<E> {
    let filter = get_id_filter(id);
    find_one_by::<E, D>(collection, filter).await
}

pub async fn find_one_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Option<E> {
    match collection.find_one(filter, None).await {
        Ok(Some(doc)) => match persistence_to_entity::<E, D>(doc) {
            Ok(entity) => Some(entity),
            Err(e) => {
                error!("Unable to deserialize mongodb document: {:?}", e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            error!("Mongodb query failed: {:?}", e);
            None
        }
    }
}

pub async fn delete<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    id: &ObjectId,
) -> Option<E> {
    let filter = get_id_filter(id);
    match collection.find_one_and_delete(filter, None).await {
        Ok(Some(doc)) => persistence_to_entity::<E, D>(doc).ok(),
        Ok(None) => None,
        Err(e) => {
            error!("Mongodb delete failed: {:?}", e);
            None
        }
    }
}
